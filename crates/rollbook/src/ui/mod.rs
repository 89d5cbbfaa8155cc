//! Interactive menu layer for rollbook.
//!
//! A fixed menu drives the whole session: read one line, parse it as a
//! choice, dispatch to a handler, repeat until exit. Handlers run their own
//! nested prompts; their failures are reported and the loop continues, so
//! nothing short of choosing `0` (or losing the terminal) ends the session.

mod prompts;

use dialoguer::{Confirm, Input, Select};
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::record::{SortKey, Student, StudentUpdate};
use crate::store::stats::Statistics;
use crate::store::RecordStore;

/// Run the interactive menu session until the user exits.
///
/// # Errors
///
/// Returns an error only when the menu prompt itself can no longer read
/// input (for example the terminal went away); handler failures are
/// reported inline and the session continues.
pub fn run_menu(store: &mut RecordStore, config: &Config) -> Result<()> {
    loop {
        print_menu();
        let choice = Input::<String>::new()
            .with_prompt("Enter your choice [0-8]")
            .interact_text()?;

        match choice.trim() {
            "0" => {
                println!("Goodbye!");
                return Ok(());
            }
            "1" => report(handle_add(store)),
            "2" => print_table(store.students()),
            "3" => report(handle_search(store)),
            "4" => report(handle_update(store)),
            "5" => report(handle_delete(store)),
            "6" => report(handle_sort(store)),
            "7" => report(handle_export(store, config)),
            "8" => match store.stats() {
                Some(stats) => print_statistics(&stats),
                None => println!("No student data available."),
            },
            other => println!("Invalid choice {other:?}, enter a number from 0 to 8."),
        }
    }
}

/// Report a handler failure without ending the session.
fn report(result: Result<()>) {
    if let Err(err) = result {
        debug!("menu action failed: {err}");
        println!("Error: {err}");
    }
}

/// Render the fixed menu.
fn print_menu() {
    println!();
    println!("==============================================");
    println!("          STUDENT MANAGEMENT SYSTEM");
    println!("==============================================");
    println!("0. Exit");
    println!("1. Add new student");
    println!("2. View all students");
    println!("3. Search students");
    println!("4. Update a student");
    println!("5. Delete a student");
    println!("6. Sort students");
    println!("7. Export to CSV");
    println!("8. Statistics");
    println!("==============================================");
}

/// Gather one validated record and add it to the store.
fn handle_add(store: &mut RecordStore) -> Result<()> {
    println!("\nAdd a new student");
    let name = prompts::student_name()?;
    let roll_number = prompts::new_roll_number(store)?;
    let age = prompts::age()?;
    let cgpa = prompts::cgpa()?;

    store.add(Student::new(roll_number, name, age, cgpa))?;
    println!("Student added.");
    Ok(())
}

/// Search by roll number, name substring, or value range.
fn handle_search(store: &RecordStore) -> Result<()> {
    if store.is_empty() {
        println!("No students to search.");
        return Ok(());
    }

    let items = ["Roll number", "Name", "Age range", "CGPA range", "Back"];
    let choice = Select::new()
        .with_prompt("Search by")
        .items(&items)
        .default(0)
        .interact()?;

    match choice {
        0 => {
            let roll = prompts::lookup_roll_number()?;
            match store.find_by_roll(roll) {
                Some(student) => print_table([student]),
                None => println!("No student found with roll number {roll}."),
            }
        }
        1 => {
            let needle = Input::<String>::new()
                .with_prompt("Name (partial matches accepted)")
                .interact_text()?;
            let matches = store.find_by_name(&needle);
            if matches.is_empty() {
                println!("No matching students found.");
            } else {
                print_table(matches);
            }
        }
        2 => {
            let (min_age, max_age) = prompts::age_range()?;
            let matches = store.find_by_age_range(min_age, max_age);
            if matches.is_empty() {
                println!("No students in this age range.");
            } else {
                print_table(matches);
            }
        }
        3 => {
            let (min_cgpa, max_cgpa) = prompts::cgpa_range()?;
            let matches = store.find_by_cgpa_range(min_cgpa, max_cgpa);
            if matches.is_empty() {
                println!("No students in this CGPA range.");
            } else {
                print_table(matches);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Locate a record by roll number and update one of its fields.
fn handle_update(store: &mut RecordStore) -> Result<()> {
    if store.is_empty() {
        println!("No students to update.");
        return Ok(());
    }

    let roll = prompts::lookup_roll_number()?;
    let Some(student) = store.find_by_roll(roll).cloned() else {
        println!("No student found with roll number {roll}.");
        return Ok(());
    };

    println!("\nCurrent details:");
    print_table([&student]);

    let items = ["Name", "Age", "CGPA", "Cancel"];
    let choice = Select::new()
        .with_prompt("Field to update")
        .items(&items)
        .default(0)
        .interact()?;

    match choice {
        0 => {
            let name = prompts::student_name()?;
            store.update(roll, StudentUpdate::Name(name))?;
            println!("Name updated.");
        }
        1 => {
            let age = prompts::age()?;
            store.update(roll, StudentUpdate::Age(age))?;
            println!("Age updated.");
        }
        2 => {
            let cgpa = prompts::cgpa()?;
            store.update(roll, StudentUpdate::Cgpa(cgpa))?;
            println!("CGPA updated.");
        }
        _ => println!("Update cancelled."),
    }
    Ok(())
}

/// Locate a record by roll number, confirm, and delete it.
fn handle_delete(store: &mut RecordStore) -> Result<()> {
    if store.is_empty() {
        println!("No students to delete.");
        return Ok(());
    }

    let roll = prompts::lookup_roll_number()?;
    let Some(student) = store.find_by_roll(roll).cloned() else {
        println!("No student found with roll number {roll}.");
        return Ok(());
    };

    let confirmed = Confirm::new()
        .with_prompt(format!("Delete {}?", student.name))
        .default(false)
        .interact()?;

    if confirmed {
        store.delete(roll)?;
        println!("Student deleted.");
    } else {
        println!("Deletion cancelled.");
    }
    Ok(())
}

/// Pick a sort key, reorder the collection, and show the result.
fn handle_sort(store: &mut RecordStore) -> Result<()> {
    if store.is_empty() {
        println!("No students to sort.");
        return Ok(());
    }

    let items = [
        "Roll number (ascending)",
        "Name (A-Z)",
        "Age (youngest first)",
        "CGPA (highest first)",
        "Cancel",
    ];
    let choice = Select::new()
        .with_prompt("Sort by")
        .items(&items)
        .default(0)
        .interact()?;

    let key = match choice {
        0 => SortKey::RollNumber,
        1 => SortKey::Name,
        2 => SortKey::Age,
        3 => SortKey::CgpaDescending,
        _ => {
            println!("Sorting cancelled.");
            return Ok(());
        }
    };

    store.sort(key)?;
    println!("Sorted by {key}.");
    print_table(store.students());
    Ok(())
}

/// Export the collection to the configured CSV path.
fn handle_export(store: &RecordStore, config: &Config) -> Result<()> {
    if store.is_empty() {
        println!("No students to export.");
        return Ok(());
    }

    let path = config.csv_export_path();
    store.export_csv(&path)?;
    println!("Students exported to {}", path.display());
    Ok(())
}

/// Render records as an aligned table, or a notice when there are none.
pub fn print_table<'a, I>(students: I)
where
    I: IntoIterator<Item = &'a Student>,
{
    let students: Vec<&Student> = students.into_iter().collect();
    if students.is_empty() {
        println!("No students found.");
        return;
    }

    println!("{:<10}{:<25}{:<10}{:<10}", "Roll No", "Name", "Age", "CGPA");
    println!("{}", "-".repeat(55));
    for student in students {
        println!("{}", student_row(student));
    }
}

/// One aligned table row.
fn student_row(student: &Student) -> String {
    format!(
        "{:<10}{:<25}{:<10}{:<10}",
        student.roll_number, student.name, student.age, student.cgpa
    )
}

/// Render collection statistics, skipping empty buckets.
pub fn print_statistics(stats: &Statistics) {
    println!("\nTotal students: {}", stats.total);
    println!("Average age:    {:.1} years", stats.mean_age);
    println!("Average CGPA:   {:.2}", stats.mean_cgpa);

    println!("\nAge distribution:");
    for line in distribution_lines(&stats.age_distribution, stats.total) {
        println!("{line}");
    }

    println!("\nCGPA distribution:");
    for line in distribution_lines(&stats.cgpa_distribution, stats.total) {
        println!("{line}");
    }
}

/// Format the non-empty buckets of one distribution.
fn distribution_lines(buckets: &[crate::store::stats::Bucket], total: usize) -> Vec<String> {
    buckets
        .iter()
        .filter(|bucket| bucket.count > 0)
        .map(|bucket| {
            format!(
                "  {}: {} ({:.1}%)",
                bucket.label,
                bucket.count,
                bucket.percentage(total)
            )
        })
        .collect()
}
