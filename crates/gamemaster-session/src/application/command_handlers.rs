//! Command handlers for the Session context.
//!
//! One inbound message advances the state machine by exactly one step.
//! Onboarding steps only touch the draft carried in the state token; the
//! adventure record is written when onboarding completes and after every
//! play turn.

use gamemaster_character::application::generate::companion_sheet;
use gamemaster_content::application::import::apply_module;
use gamemaster_content::domain::presets;
use gamemaster_core::clock::Clock;
use gamemaster_core::command::Command;
use gamemaster_core::error::DomainError;
use gamemaster_core::gateway::ModelGateway;
use gamemaster_core::message::Turn;
use gamemaster_core::record::{AdventureRecord, validate_adventure_name};
use gamemaster_core::repository::AdventureRepository;
use gamemaster_core::sheet::AttributeValue;
use gamemaster_narrative::application::recap::recap;
use gamemaster_narrative::application::shaper::{ShaperSettings, shape_reply};
use gamemaster_narrative::domain::policy::narrator_instruction;
use gamemaster_narrative::domain::window::window;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::commands::SubmitMessage;
use crate::domain::prompts::{
    self, LOAD_WORDS, NEW_WORDS, NO_WORDS, PLAY_HINT, QUIT_WORDS, WELCOME, YES_WORDS, is_one_of,
};
use crate::domain::state::{AdventureDraft, SessionState, Step};

/// Collaborators a message handler needs.
#[derive(Clone, Copy)]
pub struct SessionContext<'a> {
    /// Source of `saved_at` stamps.
    pub clock: &'a dyn Clock,
    /// Language model backend.
    pub gateway: &'a dyn ModelGateway,
    /// Adventure store.
    pub repository: &'a dyn AdventureRepository,
    /// Budgets for shaped play replies.
    pub shaper: ShaperSettings,
    /// Most recent turns sent to the model alongside the system turn.
    pub max_turns: usize,
}

/// Result of handling one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    /// Text shown to the player.
    pub reply: String,
    /// What input is expected next.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_hint: Option<String>,
    /// State token for the next message.
    pub state: SessionState,
}

impl StepOutcome {
    fn onboarding(reply: String, step: Step, draft: AdventureDraft) -> Self {
        Self {
            reply,
            prompt_hint: Some(prompts::hint(&step).to_owned()),
            state: SessionState::at(step, draft),
        }
    }

    fn playing(reply: String, adventure_name: String) -> Self {
        Self {
            reply,
            prompt_hint: Some(PLAY_HINT.to_owned()),
            state: SessionState::Playing { adventure_name },
        }
    }
}

/// Moves to `step`, leading the prompt with `lead` when it is not empty.
fn advance(lead: &str, step: Step, draft: AdventureDraft) -> StepOutcome {
    let question = prompts::prompt(&step, &draft);
    let reply = if lead.is_empty() {
        question
    } else {
        format!("{lead}\n\n{question}")
    };
    StepOutcome::onboarding(reply, step, draft)
}

/// Stays on `step` with the draft untouched.
fn reprompt(problem: &str, step: Step, draft: AdventureDraft) -> StepOutcome {
    let reply = format!("{problem}\n{}", prompts::prompt(&step, &draft));
    StepOutcome::onboarding(reply, step, draft)
}

fn reset(problem: &DomainError) -> StepOutcome {
    StepOutcome::onboarding(
        format!(
            "The session could not be resumed ({problem}). Starting over; send any message \
to begin."
        ),
        Step::Start,
        AdventureDraft::default(),
    )
}

/// Handles the `SubmitMessage` command against the state decoded from
/// `token`.
///
/// An undecodable token, or one whose draft lacks what its step needs,
/// resets the session to the start instead of failing.
///
/// # Errors
///
/// Returns `DomainError::Gateway` if a play turn cannot be narrated, in which
/// case nothing is persisted and the same message can be sent again with the
/// same token. Returns `DomainError::NotFound` if the adventure being played
/// no longer exists, and `DomainError::Infrastructure` on store failures.
pub async fn handle_submit_message(
    command: &SubmitMessage,
    token: Option<&Value>,
    ctx: &SessionContext<'_>,
) -> Result<StepOutcome, DomainError> {
    let state = match SessionState::from_token(token) {
        Ok(state) => state,
        Err(e) => {
            warn!(
                correlation_id = %command.correlation_id(),
                error = %e,
                "session state rejected; resetting"
            );
            return Ok(reset(&e));
        }
    };
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        step = state.step_name(),
        "handling message"
    );

    let outcome = match state {
        SessionState::Playing { adventure_name } => play_turn(command, adventure_name, ctx).await,
        SessionState::Onboarding { step, draft } => onboard(command, step, draft, ctx).await,
    };

    match outcome {
        Ok(next) => {
            debug!(next_step = next.state.step_name(), "step handled");
            Ok(next)
        }
        Err(e @ DomainError::CorruptState(_)) => {
            warn!(
                correlation_id = %command.correlation_id(),
                error = %e,
                "session state inconsistent; resetting"
            );
            Ok(reset(&e))
        }
        Err(e) => Err(e),
    }
}

#[allow(clippy::too_many_lines)]
async fn onboard(
    command: &SubmitMessage,
    step: Step,
    mut draft: AdventureDraft,
    ctx: &SessionContext<'_>,
) -> Result<StepOutcome, DomainError> {
    let input = command.text.trim();

    match step {
        Step::Start => Ok(advance(WELCOME, Step::ChoosePath, draft)),

        Step::ChoosePath => {
            if is_one_of(input, LOAD_WORDS) {
                let saves: Vec<String> = ctx
                    .repository
                    .list()
                    .await?
                    .into_iter()
                    .map(|s| s.adventure_name)
                    .collect();
                if saves.is_empty() {
                    return Ok(advance(
                        "There are no saved adventures yet. Let's start a new one.",
                        Step::NameAdventure,
                        draft,
                    ));
                }
                Ok(advance("", Step::SelectSave { saves }, draft))
            } else if is_one_of(input, NEW_WORDS) {
                Ok(advance("", Step::NameAdventure, draft))
            } else {
                Ok(reprompt("Please answer 'load' or 'new'.", step, draft))
            }
        }

        Step::SelectSave { saves } => {
            if input.eq_ignore_ascii_case("n") {
                return Ok(advance("", Step::NameAdventure, draft));
            }
            let picked = input
                .parse::<usize>()
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| saves.get(i))
                .cloned();
            let Some(name) = picked else {
                return Ok(reprompt(
                    "That is not one of the listed adventures.",
                    Step::SelectSave { saves },
                    draft,
                ));
            };
            resume(name, Step::SelectSave { saves }, draft, ctx).await
        }

        Step::NameAdventure => {
            if let Err(DomainError::Validation(problem)) = validate_adventure_name(input) {
                return Ok(reprompt(&problem, step, draft));
            }
            draft.adventure_name = Some(input.to_owned());
            draft.overwrite_confirmed = false;
            if ctx.repository.exists(input).await? {
                return Ok(advance("", Step::ConfirmOverwrite, draft));
            }
            if draft.is_complete() {
                return finish_onboarding(draft, ctx).await;
            }
            Ok(advance("", Step::ChooseRules, draft))
        }

        Step::ConfirmOverwrite => {
            if is_one_of(input, YES_WORDS) {
                draft.overwrite_confirmed = true;
                if draft.is_complete() {
                    return finish_onboarding(draft, ctx).await;
                }
                Ok(advance("", Step::ChooseRules, draft))
            } else {
                draft.adventure_name = None;
                draft.overwrite_confirmed = false;
                Ok(advance("Choose another name, then.", Step::NameAdventure, draft))
            }
        }

        Step::ChooseRules => match presets::by_choice(input) {
            Some(rules) => {
                draft.rules = Some(rules);
                Ok(advance("", Step::AttachModule, draft))
            }
            None => Ok(reprompt("Only option 1 is currently supported.", step, draft)),
        },

        Step::AttachModule => {
            if let Some(module) = &command.module {
                let current = draft.rules()?.clone();
                return match apply_module(current, module) {
                    Ok(rules) => {
                        let lead = format!("Module '{}' loaded.", rules.name);
                        draft.rules = Some(rules);
                        Ok(advance(&lead, Step::PlayerName, draft))
                    }
                    Err(e) => {
                        warn!(module = %module.name, error = %e, "module import failed");
                        Ok(reprompt(&format!("The module could not be read: {e}."), step, draft))
                    }
                };
            }
            if is_one_of(input, NO_WORDS) {
                Ok(advance("", Step::PlayerName, draft))
            } else {
                Ok(reprompt("Attach a module file or answer 'no'.", step, draft))
            }
        }

        Step::PlayerName => {
            if input.is_empty() {
                return Ok(reprompt("Your character needs a name.", step, draft));
            }
            draft.player.name = Some(input.to_owned());
            Ok(advance("", Step::PlayerClass, draft))
        }

        Step::PlayerClass => {
            if input.is_empty() {
                return Ok(reprompt("Your character needs a class.", step, draft));
            }
            draft.player.class = Some(input.to_owned());
            let next = if draft.rules()?.attributes.is_empty() {
                Step::PlayerHistory
            } else {
                Step::PlayerAttribute { index: 0 }
            };
            Ok(advance("", next, draft))
        }

        Step::PlayerAttribute { index } => {
            if input.is_empty() {
                return Ok(reprompt("Please enter a value.", step, draft));
            }
            let rules = draft.rules()?;
            let count = rules.attributes.len();
            let attribute = rules.attributes.get(index).cloned().ok_or_else(|| {
                DomainError::CorruptState(format!("attribute index {index} out of range"))
            })?;
            draft
                .player
                .attributes
                .insert(attribute, AttributeValue::parse(input));
            let next = if index + 1 < count {
                Step::PlayerAttribute { index: index + 1 }
            } else {
                Step::PlayerHistory
            };
            Ok(advance("", next, draft))
        }

        Step::PlayerHistory => {
            draft.player.history = Some(input.to_owned());
            let sheet = draft.player_sheet()?;
            let lead = format!("Character sheet created for {}.", sheet.name);
            Ok(advance(&lead, Step::CompanionCount, draft))
        }

        Step::CompanionCount => match input.parse::<usize>() {
            Ok(0) => {
                draft.n_npcs = Some(0);
                finish_onboarding(draft, ctx).await
            }
            Ok(count) => {
                draft.n_npcs = Some(count);
                Ok(advance("", Step::CompanionName { index: 0 }, draft))
            }
            Err(_) => Ok(reprompt(
                "Please enter a whole number (0 or more).",
                step,
                draft,
            )),
        },

        Step::CompanionName { index } => {
            if input.is_empty() {
                return Ok(reprompt("Your companion needs a name.", step, draft));
            }
            let sheet = companion_sheet(draft.rules()?, input, ctx.gateway).await;
            draft.npcs.push(sheet);
            if index + 1 < draft.n_npcs.unwrap_or_default() {
                let lead = format!("Companion {input} joins the party.");
                Ok(advance(&lead, Step::CompanionName { index: index + 1 }, draft))
            } else {
                finish_onboarding(draft, ctx).await
            }
        }
    }
}

/// Loads a saved adventure and summarises it for the returning player.
async fn resume(
    name: String,
    step: Step,
    draft: AdventureDraft,
    ctx: &SessionContext<'_>,
) -> Result<StepOutcome, DomainError> {
    let record = match ctx.repository.load(&name).await {
        Ok(record) => record,
        Err(DomainError::NotFound(_)) => {
            return Ok(reprompt(
                &format!("The adventure '{name}' is no longer available."),
                step,
                draft,
            ));
        }
        Err(e) => return Err(e),
    };

    let summary = recap(&record.messages, ctx.gateway).await;
    info!(adventure = %name, turns = record.messages.len(), "adventure resumed");
    let reply = format!(
        "Adventure summary:\n{summary}\n\n{}",
        prompts::play_banner(&name)
    );
    Ok(StepOutcome::playing(reply, name))
}

/// Writes the new adventure with an empty transcript and enters play.
///
/// The name is checked again first: another session may have saved an
/// adventure under it since it was chosen, and that one is only replaced
/// once the player confirms.
async fn finish_onboarding(
    draft: AdventureDraft,
    ctx: &SessionContext<'_>,
) -> Result<StepOutcome, DomainError> {
    let adventure_name = draft.adventure_name()?.to_owned();
    if !draft.overwrite_confirmed && ctx.repository.exists(&adventure_name).await? {
        info!(adventure = %adventure_name, "name taken during onboarding; asking first");
        let lead = format!(
            "An adventure called '{adventure_name}' was saved while yours was being created."
        );
        return Ok(advance(&lead, Step::ConfirmOverwrite, draft));
    }
    let record = AdventureRecord {
        player_sheet: draft.player_sheet()?,
        rules: draft.rules()?.clone(),
        adventure_name: adventure_name.clone(),
        npcs: draft.npcs,
        messages: Vec::new(),
        saved_at: Some(ctx.clock.now()),
    };
    ctx.repository.save(&record).await?;
    info!(
        adventure = %adventure_name,
        companions = record.npcs.len(),
        "adventure created"
    );

    let reply = format!(
        "Adventure '{adventure_name}' created and saved!\n\n{}",
        prompts::play_banner(&adventure_name)
    );
    Ok(StepOutcome::playing(reply, adventure_name))
}

/// Narrates one player action and persists the grown transcript.
async fn play_turn(
    command: &SubmitMessage,
    adventure_name: String,
    ctx: &SessionContext<'_>,
) -> Result<StepOutcome, DomainError> {
    let action = command.text.trim();

    if is_one_of(action, QUIT_WORDS) {
        info!(adventure = %adventure_name, "play session ended by player");
        return Ok(StepOutcome::onboarding(
            format!("Adventure '{adventure_name}' is saved. See you next time!"),
            Step::Start,
            AdventureDraft::default(),
        ));
    }
    if action.is_empty() {
        return Ok(StepOutcome::playing(
            "Tell the Game Master what you do.".to_owned(),
            adventure_name,
        ));
    }

    let mut record = ctx.repository.load(&adventure_name).await?;
    if record.messages.is_empty() {
        record.messages.push(Turn::system(narrator_instruction(
            &record.rules,
            &record.player_sheet,
            &record.npcs,
        )));
    }
    record.messages.push(Turn::user(action));

    let bounded = window(&record.messages, ctx.max_turns);
    let reply = shape_reply(&bounded, &ctx.shaper, ctx.gateway).await?;

    record.messages.push(Turn::assistant(reply.clone()));
    record.saved_at = Some(ctx.clock.now());
    ctx.repository.save(&record).await?;
    debug!(
        adventure = %adventure_name,
        turns = record.messages.len(),
        "play turn persisted"
    );

    Ok(StepOutcome::playing(reply, adventure_name))
}
