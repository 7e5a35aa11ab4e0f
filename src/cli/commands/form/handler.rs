//! Interactive form filling and form inspection

use anyhow::{Context, Result};
use colored::*;

use crate::api::models::{Question, QuestionType, Submission};
use crate::api::ScriptClient;
use crate::config::Config;
use crate::form::{FieldValue, FormEngine};
use crate::ui::prompts;

use super::{FormCommands, FormSubcommands};

pub async fn handle_form_command(args: FormCommands) -> Result<()> {
    match args.command {
        FormSubcommands::Fill { url, dry } => fill_command(url, dry).await,
        FormSubcommands::Show { url, group } => show_command(url, group).await,
    }
}

async fn load_form(url: Option<String>) -> Result<(ScriptClient, FormEngine)> {
    let config = Config::load()?;
    let client = ScriptClient::new(config.resolve_url(url)?);

    println!("🔄 {}", "Loading form definition...".dimmed());
    // Questions and rules have no ordering dependency; fetch both at once.
    // Either failure aborts the whole load.
    let (questions, rules) = tokio::try_join!(client.get_questions(), client.get_configurations())
        .context("Failed to load the form")?;

    if questions.is_empty() {
        anyhow::bail!("The form has no questions");
    }

    let engine = FormEngine::new(
        questions,
        rules,
        config.settings.group_selector_question.clone(),
    );
    Ok((client, engine))
}

async fn fill_command(url: Option<String>, dry: bool) -> Result<()> {
    let (client, mut engine) = load_form(url).await?;
    println!();

    let ordered: Vec<Question> = engine.questions().to_vec();
    for question in &ordered {
        // Restrictions applied by an earlier group selection skip this one.
        if engine.is_hidden(&question.id) {
            continue;
        }

        loop {
            let value = prompt_for(&engine, question)?;
            let chosen_group = match (&value, engine.is_group_selector(&question.id)) {
                (FieldValue::Choice(Some(group)), true) => Some(group.clone()),
                _ => None,
            };

            match engine.answer(&question.id, value) {
                Ok(()) => {
                    if let Some(group) = chosen_group {
                        engine.select_group(&group);
                    }
                    break;
                }
                Err(err) => println!("⚠️  {}", err.to_string().yellow()),
            }
        }
    }

    engine.validate().context("Validation failed")?;

    let submission = Submission::new(engine.collect());
    println!();
    println!("📋 Your answers:");
    for question in engine.visible_questions() {
        let value = submission
            .answers
            .get(&question.id)
            .and_then(serde_json::Value::as_str)
            .unwrap_or("");
        let shown = if value.is_empty() {
            "-".dimmed().to_string()
        } else {
            value.to_string()
        };
        println!("  {} {}", format!("{}:", question.text).bold(), shown);
    }
    println!();

    if dry {
        println!("🔍 Submission payload:");
        println!("{}", serde_json::to_string_pretty(&submission)?);
        return Ok(());
    }

    if !prompts::prompt_confirmation("Submit these answers?", true)? {
        println!("Submission cancelled.");
        return Ok(());
    }

    println!("🚀 {}", "Submitting...".dimmed());
    if let Err(err) = client.submit(&submission).await {
        println!(
            "❌ {}",
            "Your answers were not sent. Run 'forms-cli form fill' to try again.".red()
        );
        return Err(err).context("Failed to submit the form");
    }

    println!("✅ {}", "Answers submitted. Thank you!".bright_green());
    Ok(())
}

async fn show_command(url: Option<String>, group: Option<String>) -> Result<()> {
    let (_client, mut engine) = load_form(url).await?;

    if let Some(group) = &group {
        engine.select_group(group);
        println!("🌍 Previewing form for group: {}", group.bright_green().bold());
    }
    println!();

    for (index, question) in engine.questions().iter().enumerate() {
        let required = if question.required {
            " *".red().to_string()
        } else {
            String::new()
        };
        let hidden = if engine.is_hidden(&question.id) {
            " [hidden for this group]".dimmed().to_string()
        } else {
            String::new()
        };
        let selector = if engine.is_group_selector(&question.id) {
            " [group selector]".cyan().to_string()
        } else {
            String::new()
        };

        println!(
            "{}. {}{}{}{}",
            index + 1,
            question.text.bold(),
            required,
            selector,
            hidden
        );
        println!("   {}", format!("{:?}", question.kind).dimmed());
        for option in &question.options {
            if engine.is_exhausted(question, option) {
                println!("   - {} {}", option, "(exhausted)".yellow());
            } else {
                println!("   - {option}");
            }
        }
    }

    Ok(())
}

fn prompt_for(engine: &FormEngine, question: &Question) -> Result<FieldValue> {
    let label = if question.required {
        format!("{} {}", question.text, "*".red())
    } else {
        question.text.clone()
    };

    match question.kind {
        QuestionType::FreeText => Ok(FieldValue::Text(prompts::text_input(&label)?)),
        QuestionType::Dropdown | QuestionType::SingleChoice => {
            let mut items = vec!["(leave blank)".dimmed().to_string()];
            items.extend(
                question
                    .options
                    .iter()
                    .map(|option| option_label(engine, question, option)),
            );
            let choice = prompts::select(&label, &items, 0)?;
            if choice == 0 {
                Ok(FieldValue::Choice(None))
            } else {
                Ok(FieldValue::Choice(Some(question.options[choice - 1].clone())))
            }
        }
        QuestionType::MultiChoice => {
            let items: Vec<String> = question
                .options
                .iter()
                .map(|option| option_label(engine, question, option))
                .collect();
            let picked = prompts::multi_select(&label, &items)?;
            Ok(FieldValue::Multi(
                picked
                    .into_iter()
                    .map(|index| question.options[index].clone())
                    .collect(),
            ))
        }
    }
}

fn option_label(engine: &FormEngine, question: &Question, option: &str) -> String {
    if engine.is_exhausted(question, option) {
        format!("{} {}", option, "(exhausted)".yellow())
    } else {
        option.to_string()
    }
}
