use crate::items::Unsuitable;
use serde::Serialize;

/// Slot index inside the host inventory.
pub type SlotRef = usize;

/// Stage of one toolkit interaction. `Consumed` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Validating,
    Selecting,
    Mutating,
    Consumed,
    Aborted,
}

impl Phase {
    pub fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Idle, Phase::Validating)
                | (Phase::Validating, Phase::Selecting)
                | (Phase::Validating, Phase::Aborted)
                | (Phase::Selecting, Phase::Mutating)
                | (Phase::Selecting, Phase::Aborted)
                | (Phase::Mutating, Phase::Consumed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Consumed | Phase::Aborted)
    }
}

/// Which side's result is trusted. Only the authoritative side mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    Authoritative,
    Predictive,
}

/// Toolkit and target slots of one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolkitUseRequest {
    pub toolkit_slot: SlotRef,
    pub target_slot: SlotRef,
}

impl ToolkitUseRequest {
    pub fn new(toolkit_slot: SlotRef, target_slot: SlotRef) -> Self {
        Self {
            toolkit_slot,
            target_slot,
        }
    }

    /// Target the slot immediately to the right of the toolkit.
    pub fn adjacent(toolkit_slot: SlotRef) -> Self {
        Self::new(toolkit_slot, toolkit_slot.saturating_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Bad or missing toolkit/tier data. Shown to the user as a neutral failure.
    Configuration,
    /// The target may not receive a tier right now.
    Suitability,
    /// Nothing usable in the toolkit or target slot.
    Interaction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    MissingToolkit,
    ToolkitNotRecognized { code: String },
    NoTargetSlot,
    NoTarget,
    Unsuitable(Unsuitable),
    /// The toolkit's pool has nothing drawable.
    EmptyPool { toolkit: String },
    /// The selector produced a key the registry does not define.
    UnknownTier { key: String },
}

impl AbortReason {
    pub fn class(&self) -> FailureClass {
        match self {
            AbortReason::ToolkitNotRecognized { .. }
            | AbortReason::EmptyPool { .. }
            | AbortReason::UnknownTier { .. } => FailureClass::Configuration,
            AbortReason::Unsuitable(_) => FailureClass::Suitability,
            AbortReason::MissingToolkit | AbortReason::NoTargetSlot | AbortReason::NoTarget => {
                FailureClass::Interaction
            }
        }
    }

    /// Localization key for the user-facing message.
    pub fn message_key(&self) -> &'static str {
        match self {
            AbortReason::Unsuitable(Unsuitable::AlreadyEnhanced) => {
                lang::ERROR_ALREADY_ENHANCED
            }
            AbortReason::Unsuitable(_) => lang::ERROR_UNSUITABLE,
            AbortReason::NoTargetSlot => lang::ERROR_NO_TARGET_SLOT,
            AbortReason::NoTarget => lang::ERROR_NO_TARGET,
            AbortReason::MissingToolkit
            | AbortReason::ToolkitNotRecognized { .. }
            | AbortReason::EmptyPool { .. }
            | AbortReason::UnknownTier { .. } => lang::ERROR_ENHANCE_FAILED,
        }
    }
}

/// Localization keys handed to the host's message output.
pub mod lang {
    pub const SUCCESS_ENHANCED: &str = "itemrarity:success-enhanced";
    pub const ERROR_ALREADY_ENHANCED: &str = "itemrarity:error-alreadyenhancedortoolowtier";
    pub const ERROR_UNSUITABLE: &str = "itemrarity:error-unsuitable";
    pub const ERROR_NO_TARGET_SLOT: &str = "itemrarity:error-no-target-slot";
    pub const ERROR_NO_TARGET: &str = "itemrarity:error-no-target";
    pub const ERROR_ENHANCE_FAILED: &str = "itemrarity:error-enhance-failed";
}

pub const APPLY_SOUND: &str = "game:sounds/effect/tink";

/// Side effects for the host: sounds and localized chat messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Sound { asset: &'static str, slot: SlotRef },
    Message { key: &'static str, args: Vec<String> },
}

/// Receiver of [`Feedback`] events.
pub trait FeedbackSink {
    fn emit(&mut self, feedback: Feedback);
}

impl FeedbackSink for Vec<Feedback> {
    fn emit(&mut self, feedback: Feedback) {
        self.push(feedback);
    }
}

/// Drops sounds and writes messages to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn emit(&mut self, feedback: Feedback) {
        if let Feedback::Message { key, args } = feedback {
            tracing::info!(key, ?args, "feedback");
        }
    }
}

/// A tier assignment, applied or predicted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhancement {
    pub target_slot: SlotRef,
    pub rarity_key: String,
    pub rarity_name: String,
    pub previous: Option<String>,
    pub toolkit: String,
    pub toolkit_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolkitOutcome {
    /// Authoritative: tag written and one toolkit unit consumed.
    Consumed(Enhancement),
    /// Speculative draw on a predicting side. Nothing was mutated.
    Predicted(Enhancement),
    Aborted { during: Phase, reason: AbortReason },
}

impl ToolkitOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, ToolkitOutcome::Consumed(_))
    }

    pub fn abort_reason(&self) -> Option<&AbortReason> {
        match self {
            ToolkitOutcome::Aborted { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn enhancement(&self) -> Option<&Enhancement> {
        match self {
            ToolkitOutcome::Consumed(e) | ToolkitOutcome::Predicted(e) => Some(e),
            ToolkitOutcome::Aborted { .. } => None,
        }
    }
}
