use super::Prompter;

use std::io::Cursor;

use anyhow::Result;

use crate::models::Preferences;
use crate::types::Status;

fn create_prompter(answers: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
    Prompter::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new())
}

#[test]
fn test_status_is_accepted_in_any_case() -> Result<()> {
    let mut prompter = create_prompter("executed\n");

    assert_eq!(prompter.ask_status()?, Some(Status::Executed));

    Ok(())
}

#[test]
fn test_status_retries_until_valid() -> Result<()> {
    let mut prompter = create_prompter("done\nfinished\npending\n");

    assert_eq!(prompter.ask_status()?, Some(Status::Pending));

    let transcript = String::from_utf8(prompter.output)?;
    assert!(transcript.contains("Status 'done' is not available."));
    assert!(transcript.contains("Status 'finished' is not available."));

    Ok(())
}

#[test]
fn test_status_gives_up_after_the_attempt_budget() -> Result<()> {
    let mut prompter = create_prompter("a\nb\nc\nEXECUTED\n");

    assert_eq!(prompter.ask_status()?, None);

    Ok(())
}

#[test]
fn test_status_gives_up_at_end_of_input() -> Result<()> {
    let mut prompter = create_prompter("");

    assert_eq!(prompter.ask_status()?, None);

    Ok(())
}

#[test]
fn test_preferences_collect_every_choice() -> Result<()> {
    let mut prompter = create_prompter("yes\nby ascending\nYES\ny\n  перевод  \n");

    let preferences = prompter.ask_preferences()?;

    assert_eq!(preferences, Preferences {
        sort_date: true,
        sort_ascending: true,
        rub_only: true,
        currency: None,
        search_word: Some("перевод".to_string())
    });

    Ok(())
}

#[test]
fn test_preferences_skip_sort_order_when_not_sorting() -> Result<()> {
    let mut prompter = create_prompter("no\nno\nno\n");

    assert_eq!(prompter.ask_preferences()?, Preferences::default());

    Ok(())
}

#[test]
fn test_preferences_fall_back_to_disabled_when_answers_run_out() -> Result<()> {
    let mut prompter = create_prompter("maybe\nperhaps\nsure\n");

    assert_eq!(prompter.ask_preferences()?, Preferences::default());

    Ok(())
}

#[test]
fn test_sort_order_recognizes_descending() -> Result<()> {
    let mut prompter = create_prompter("sideways\nDescending\n");

    assert!(!prompter.ask_sort_order()?);

    Ok(())
}

#[test]
fn test_empty_search_word_disables_search() -> Result<()> {
    let mut prompter = create_prompter("no\nno\nyes\n\n");

    assert_eq!(prompter.ask_preferences()?.search_word, None);

    Ok(())
}
