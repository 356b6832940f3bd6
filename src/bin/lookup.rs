use clap::Parser;
use course_prereq_crawler::dataset;
use course_prereq_crawler::CourseRecord;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Interactive prerequisite lookup over the crawler's output file.
#[derive(Parser, Debug)]
#[command(name = "lookup")]
struct Args {
    /// Path to the crawled course dataset
    #[arg(short, long, default_value = "data/prereqs.json")]
    data: PathBuf,
}

fn list_all_courses(records: &[CourseRecord]) {
    println!("\n--- Available Courses ---");
    if records.is_empty() {
        println!("No courses found in the database.");
    }
    for record in records {
        println!("- {} (Source: {})", record.title, record.source);
    }
    println!("-------------------------");
}

fn answer(records: &[CourseRecord], course_name: &str) -> String {
    match dataset::find_by_title(records, course_name) {
        Some(record) => format!(
            "The prerequisites for '{}' are: {}. (Source: {})",
            record.title, record.prerequisites, record.source
        ),
        None => format!(
            "Sorry, I could not find a course named '{}' in the database.",
            course_name
        ),
    }
}

fn main() {
    let args = Args::parse();

    println!("Loading course data...");
    if !args.data.exists() {
        println!("Error: Data file not found at {}", args.data.display());
        println!("Please run the crawler first to generate the data.");
        return;
    }
    let records = match dataset::load_records(&args.data) {
        Ok(records) => records,
        Err(e) => {
            println!("Error reading {}: {}", args.data.display(), e);
            return;
        }
    };

    println!("Data loaded successfully. Ask me about course prerequisites!");
    println!("Type 'list' to see all available courses or 'exit' to end the session.");

    let stdin = io::stdin();
    loop {
        print!("\nEnter a course name or command: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();

        match input.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("Goodbye!");
                break;
            }
            "list" => list_all_courses(&records),
            "" => println!("Please enter a course name or command."),
            _ => println!("{}", answer(&records, input)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<CourseRecord> {
        vec![CourseRecord {
            title: "Intro To Algorithms".to_string(),
            prerequisites: "CS101, MATH201".to_string(),
            source: "https://example.edu/courses/algo".to_string(),
        }]
    }

    #[test]
    fn lookup_matches_regardless_of_case() {
        let reply = answer(&sample(), "intro to algorithms");
        assert_eq!(
            reply,
            "The prerequisites for 'Intro To Algorithms' are: CS101, MATH201. \
             (Source: https://example.edu/courses/algo)"
        );
    }

    #[test]
    fn unknown_course_gets_a_not_found_reply() {
        let reply = answer(&sample(), "Quantum Basket Weaving");
        assert_eq!(
            reply,
            "Sorry, I could not find a course named 'Quantum Basket Weaving' in the database."
        );
    }
}
