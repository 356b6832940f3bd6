use clap::Parser;
use course_prereq_crawler::convert;
use course_prereq_crawler::error::CrawlerError;
use std::fs;
use std::path::PathBuf;

/// Converts a course spreadsheet export into structured JSON.
#[derive(Parser, Debug)]
#[command(name = "convert-courses")]
struct Args {
    /// Input CSV file
    #[arg(short, long, default_value = "courses.csv")]
    input: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "processed_courses.json")]
    output: PathBuf,
}

fn main() {
    let args = Args::parse();

    if !args.input.exists() {
        println!("Error: The file '{}' was not found.", args.input.display());
        println!("Please make sure the CSV file is in the same folder as this tool.");
        return;
    }

    let courses = match convert::convert_csv(&args.input) {
        Ok(courses) => courses,
        Err(CrawlerError::MissingColumns(columns)) => {
            println!("Error: The CSV file must contain the following columns:");
            println!("{}", columns);
            return;
        }
        Err(e) => {
            println!("An error occurred: {}", e);
            return;
        }
    };

    let json = match serde_json::to_string_pretty(&courses) {
        Ok(json) => json,
        Err(e) => {
            println!("An error occurred: {}", e);
            return;
        }
    };
    if let Err(e) = fs::write(&args.output, json) {
        println!("An error occurred: {}", e);
        return;
    }

    println!("Processing complete!");
    println!("Successfully processed {} courses.", courses.len());
    println!("Data saved to '{}'.", args.output.display());
}
