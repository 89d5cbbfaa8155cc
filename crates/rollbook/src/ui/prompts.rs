//! Validated input prompts for the interactive session.
//!
//! Each prompt keeps asking until the value parses and passes its field
//! rule, so handlers only ever see accepted values. Numeric prompts get the
//! parse retry for free from `dialoguer`; the field rules ride on
//! `validate_with`.

use dialoguer::Input;

use crate::error::Result;
use crate::store::RecordStore;
use crate::validate;

/// Prompt for a student name, letters and spaces only.
pub(super) fn student_name() -> Result<String> {
    let name = Input::<String>::new()
        .with_prompt("Student name")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if validate::validate_name(input) {
                Ok(())
            } else {
                Err("only letters and spaces are allowed")
            }
        })
        .interact_text()?;
    Ok(name.trim().to_string())
}

/// Prompt for the roll number of a record to be added: positive and unused.
pub(super) fn new_roll_number(store: &RecordStore) -> Result<u32> {
    let roll = Input::<u32>::new()
        .with_prompt("Roll number")
        .validate_with(|roll: &u32| -> std::result::Result<(), &str> {
            if !validate::validate_roll_number(*roll) {
                Err("roll number must be positive")
            } else if store.contains_roll(*roll) {
                Err("this roll number is already taken")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(roll)
}

/// Prompt for a roll number used to look up an existing record.
pub(super) fn lookup_roll_number() -> Result<u32> {
    Ok(Input::<u32>::new()
        .with_prompt("Roll number")
        .interact_text()?)
}

/// Prompt for an age within the accepted bounds.
pub(super) fn age() -> Result<u32> {
    let age = Input::<u32>::new()
        .with_prompt("Age")
        .validate_with(|age: &u32| -> std::result::Result<(), String> {
            if validate::validate_age(*age) {
                Ok(())
            } else {
                Err(format!(
                    "age must be between {} and {}",
                    validate::MIN_AGE,
                    validate::MAX_AGE
                ))
            }
        })
        .interact_text()?;
    Ok(age)
}

/// Prompt for a CGPA within the accepted bounds.
pub(super) fn cgpa() -> Result<f64> {
    let cgpa = Input::<f64>::new()
        .with_prompt("CGPA (0.0-4.0)")
        .validate_with(|cgpa: &f64| -> std::result::Result<(), String> {
            if validate::validate_cgpa(*cgpa) {
                Ok(())
            } else {
                Err(format!(
                    "CGPA must be between {:.1} and {:.1}",
                    validate::MIN_CGPA,
                    validate::MAX_CGPA
                ))
            }
        })
        .interact_text()?;
    Ok(cgpa)
}

/// Prompt for an inclusive age range.
pub(super) fn age_range() -> Result<(u32, u32)> {
    let min = Input::<u32>::new().with_prompt("Minimum age").interact_text()?;
    let max = Input::<u32>::new().with_prompt("Maximum age").interact_text()?;
    Ok((min, max))
}

/// Prompt for an inclusive CGPA range.
pub(super) fn cgpa_range() -> Result<(f64, f64)> {
    let min = Input::<f64>::new()
        .with_prompt("Minimum CGPA")
        .interact_text()?;
    let max = Input::<f64>::new()
        .with_prompt("Maximum CGPA")
        .interact_text()?;
    Ok((min, max))
}
