use dialoguer::{Confirm, Input, MultiSelect, Select};
use edo_git::FileStatus;
use edo_operations::traits::{
    ChoiceSelection, CommitInteraction, CommitMessageInteraction, CommitPrompt, CommitType,
    Confirmation, ConventionalMessage, FileSelection, InitInteraction, MessageInput,
    PackageAnswers, PackageAnswersInput, PackagePrompt, PkgInteraction, TextInput,
};
use edo_operations::{OperationError, Result};
use edo_template::{Boilerplate, Question, QuestionKind};

/// Prompts on the terminal through `dialoguer`. Escape or `q` cancels a
/// selection or confirmation.
pub struct TerminalInteractionProvider;

impl CommitInteraction for TerminalInteractionProvider {
    fn select_files(&self, changes: &[FileStatus]) -> Result<FileSelection> {
        let items: Vec<String> = changes
            .iter()
            .map(|change| format!("{} - {}", change.status, change.path.display()))
            .collect();
        let defaults = vec![true; items.len()];

        let selection = MultiSelect::new()
            .with_prompt("Select files to stage")
            .items(&items)
            .defaults(&defaults)
            .interact_opt()
            .map_err(prompt_error)?;

        match selection {
            Some(indices) => Ok(FileSelection::Selected(
                indices.into_iter().map(|i| changes[i].path.clone()).collect(),
            )),
            None => Ok(FileSelection::Cancelled),
        }
    }

    fn confirm(&self, prompt: &CommitPrompt) -> Result<Confirmation> {
        confirm(&prompt.message(), true)
    }
}

impl CommitMessageInteraction for TerminalInteractionProvider {
    fn compose_message(&self) -> Result<MessageInput> {
        let items: Vec<String> = CommitType::ALL
            .iter()
            .map(|kind| {
                let label = format!("{kind}:");
                format!("{label:<9} {}", kind.description())
            })
            .collect();

        let Some(index) = Select::new()
            .with_prompt("Select the type of change that you're committing")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?
        else {
            return Ok(MessageInput::Cancelled);
        };

        let scope = text("What is the scope of this change (press enter to skip)", "")?;
        let subject = text("Write a short, imperative tense description of the change", "")?;
        let body = text(
            "Provide a longer description of the change (use \"|\" to break new line)",
            "",
        )?
        .replace('|', "\n");
        let breaking = text("Describe the breaking changes (press enter to skip)", "")?;
        let issues = text(
            "Add issue references, e.g. \"fix #123\" (press enter to skip)",
            "",
        )?;

        Ok(MessageInput::Provided(ConventionalMessage {
            kind: CommitType::ALL[index],
            scope: optional(scope),
            subject,
            body: optional(body),
            breaking: optional(breaking),
            issues: optional(issues),
        }))
    }
}

impl InitInteraction for TerminalInteractionProvider {
    fn prompt_target_dir(&self, initial: &str, rejected: &str) -> Result<TextInput> {
        eprintln!("{rejected}");
        let dir = text("Target directory", initial)?;
        Ok(TextInput::Provided(dir))
    }

    fn select_group(&self, groups: &[String]) -> Result<ChoiceSelection> {
        select("Select a boilerplate group", groups)
    }

    fn select_boilerplate(&self, boilerplates: &[Boilerplate]) -> Result<ChoiceSelection> {
        let labels: Vec<String> = boilerplates.iter().map(Boilerplate::label).collect();
        select("Select a boilerplate", &labels)
    }

    fn confirm_deprecated(&self, boilerplate: &Boilerplate) -> Result<Confirmation> {
        confirm(
            &format!(
                "Boilerplate '{}' is deprecated. Use it anyway?",
                boilerplate.key
            ),
            false,
        )
    }

    fn ask(&self, key: &str, question: &Question, default: &str) -> Result<TextInput> {
        let prompt = question.prompt(key);
        match question.kind {
            QuestionKind::Confirm => {
                let default = matches!(default, "true" | "yes" | "y");
                Ok(match confirm(prompt, default)? {
                    Confirmation::Confirmed => TextInput::Provided("true".to_string()),
                    Confirmation::Declined => TextInput::Provided("false".to_string()),
                    Confirmation::Cancelled => TextInput::Cancelled,
                })
            }
            QuestionKind::Text => Ok(TextInput::Provided(text(prompt, default)?)),
        }
    }
}

impl PkgInteraction for TerminalInteractionProvider {
    fn ask_package(&self, prompt: &PackagePrompt) -> Result<PackageAnswersInput> {
        println!("Package {}", prompt.package_name);
        let defaults = &prompt.defaults;

        let private = match confirm("private", defaults.private)? {
            Confirmation::Confirmed => true,
            Confirmation::Declined => false,
            Confirmation::Cancelled => return Ok(PackageAnswersInput::Cancelled),
        };

        Ok(PackageAnswersInput::Provided(PackageAnswers {
            private,
            author: text("author", &defaults.author)?,
            license: text("license", &defaults.license)?,
            homepage: text("homepage", &defaults.homepage)?,
            bugs: text("bugs", &defaults.bugs)?,
        }))
    }
}

fn prompt_error(e: dialoguer::Error) -> OperationError {
    match e {
        dialoguer::Error::IO(io_err) => OperationError::Io(io_err),
    }
}

fn confirm(prompt: &str, default: bool) -> Result<Confirmation> {
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact_opt()
        .map_err(prompt_error)?;

    Ok(match answer {
        Some(true) => Confirmation::Confirmed,
        Some(false) => Confirmation::Declined,
        None => Confirmation::Cancelled,
    })
}

fn select(prompt: &str, items: &[String]) -> Result<ChoiceSelection> {
    let selection = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)?;

    Ok(selection.map_or(ChoiceSelection::Cancelled, ChoiceSelection::Selected))
}

fn text(prompt: &str, default: &str) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if !default.is_empty() {
        input = input.default(default.to_string());
    }
    input.interact_text().map_err(prompt_error)
}

fn optional(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

/// Stands in for the terminal when prompts are disabled. Choices and
/// confirmations fail with [`OperationError::InteractionRequired`]; free-text
/// answers fall back to their defaults.
pub struct NonInteractiveProvider;

impl CommitInteraction for NonInteractiveProvider {
    fn select_files(&self, _changes: &[FileStatus]) -> Result<FileSelection> {
        Err(OperationError::InteractionRequired)
    }

    fn confirm(&self, _prompt: &CommitPrompt) -> Result<Confirmation> {
        Err(OperationError::InteractionRequired)
    }
}

impl CommitMessageInteraction for NonInteractiveProvider {
    fn compose_message(&self) -> Result<MessageInput> {
        Err(OperationError::InteractionRequired)
    }
}

impl InitInteraction for NonInteractiveProvider {
    fn prompt_target_dir(&self, _initial: &str, _rejected: &str) -> Result<TextInput> {
        Err(OperationError::InteractionRequired)
    }

    fn select_group(&self, _groups: &[String]) -> Result<ChoiceSelection> {
        Err(OperationError::InteractionRequired)
    }

    fn select_boilerplate(&self, _boilerplates: &[Boilerplate]) -> Result<ChoiceSelection> {
        Err(OperationError::InteractionRequired)
    }

    fn confirm_deprecated(&self, _boilerplate: &Boilerplate) -> Result<Confirmation> {
        Err(OperationError::InteractionRequired)
    }

    fn ask(&self, _key: &str, _question: &Question, default: &str) -> Result<TextInput> {
        Ok(TextInput::Provided(default.to_string()))
    }
}

impl PkgInteraction for NonInteractiveProvider {
    fn ask_package(&self, prompt: &PackagePrompt) -> Result<PackageAnswersInput> {
        Ok(PackageAnswersInput::Provided(prompt.defaults.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use edo_git::StatusCode;
    use serde_json::json;

    use super::*;

    fn question(kind: QuestionKind) -> Question {
        Question {
            kind,
            message: None,
            default: None,
        }
    }

    #[test]
    fn non_interactive_commit_prompts_fail() {
        let changes = vec![FileStatus {
            status: StatusCode::WorktreeModified,
            path: PathBuf::from("a.txt"),
        }];

        assert!(matches!(
            NonInteractiveProvider.select_files(&changes),
            Err(OperationError::InteractionRequired)
        ));
        assert!(matches!(
            NonInteractiveProvider.confirm(&CommitPrompt::Commit),
            Err(OperationError::InteractionRequired)
        ));
        assert!(matches!(
            NonInteractiveProvider.compose_message(),
            Err(OperationError::InteractionRequired)
        ));
    }

    #[test]
    fn non_interactive_questions_take_defaults() -> anyhow::Result<()> {
        let answer = NonInteractiveProvider.ask("name", &question(QuestionKind::Text), "widget")?;

        assert_eq!(answer, TextInput::Provided("widget".to_string()));
        Ok(())
    }

    #[test]
    fn non_interactive_package_answers_are_the_defaults() -> anyhow::Result<()> {
        let defaults = PackageAnswers {
            private: true,
            author: "Jane".to_string(),
            license: "MIT".to_string(),
            homepage: "https://github.com/acme/app#readme".to_string(),
            bugs: "https://github.com/acme/app/issues".to_string(),
        };
        let prompt = PackagePrompt {
            package_name: "app".to_string(),
            defaults: defaults.clone(),
        };

        let answers = NonInteractiveProvider.ask_package(&prompt)?;

        assert_eq!(answers, PackageAnswersInput::Provided(defaults));
        Ok(())
    }

    #[test]
    fn non_interactive_boilerplate_choice_fails() {
        let boilerplate = Boilerplate {
            key: "vue".to_string(),
            package: "@acme/vue-boilerplate".to_string(),
            name: "vue".to_string(),
            description: None,
            category: None,
            deprecated: true,
        };
        let question = Question {
            default: Some(json!(true)),
            ..question(QuestionKind::Confirm)
        };

        assert!(matches!(
            NonInteractiveProvider.confirm_deprecated(&boilerplate),
            Err(OperationError::InteractionRequired)
        ));
        assert!(matches!(
            NonInteractiveProvider.ask("ts", &question, "true"),
            Ok(TextInput::Provided(value)) if value == "true"
        ));
    }

    #[test]
    fn blank_optional_answers_are_dropped() {
        assert_eq!(optional("  ".to_string()), None);
        assert_eq!(optional("ui".to_string()), Some("ui".to_string()));
    }
}
