use super::inventory::Inventory;
use super::types::*;
use crate::config::{ConfigHandle, ModConfig};
use crate::items::{check_suitability, CategoryClassifier, ItemClassifier};
use crate::selection::select;
use rand::Rng;

/// Tracks the phase of one interaction and rejects illegal transitions.
struct Interaction {
    phase: Phase,
}

impl Interaction {
    fn begin() -> Self {
        let mut interaction = Self { phase: Phase::Idle };
        interaction.advance(Phase::Validating);
        interaction
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        tracing::trace!(from = ?self.phase, to = ?next, "toolkit interaction");
        self.phase = next;
    }

    fn abort(mut self, reason: AbortReason, feedback: &mut impl FeedbackSink) -> ToolkitOutcome {
        let during = self.phase;
        self.advance(Phase::Aborted);
        match reason.class() {
            FailureClass::Configuration => {
                tracing::warn!(?reason, ?during, "toolkit interaction aborted")
            }
            FailureClass::Suitability | FailureClass::Interaction => {
                tracing::debug!(?reason, ?during, "toolkit interaction aborted")
            }
        }
        feedback.emit(Feedback::Message {
            key: reason.message_key(),
            args: Vec::new(),
        });
        ToolkitOutcome::Aborted { during, reason }
    }
}

/// Applies toolkits to items: guard, weighted draw, tag write, consumption.
pub struct ApplicationEngine {
    config: ConfigHandle,
    classifier: Box<dyn ItemClassifier + Send + Sync>,
    authority: Authority,
}

impl ApplicationEngine {
    pub fn new(config: ConfigHandle, authority: Authority) -> Self {
        Self {
            config,
            classifier: Box::new(CategoryClassifier),
            authority,
        }
    }

    pub fn with_classifier(mut self, classifier: impl ItemClassifier + Send + Sync + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Entry point for the host's toolkit-use callback.
    ///
    /// Runs against a snapshot of the config taken on entry, so a reload
    /// during the interaction does not affect it.
    pub fn on_toolkit_used(
        &self,
        request: ToolkitUseRequest,
        inventory: &mut impl Inventory,
        rng: &mut impl Rng,
        feedback: &mut impl FeedbackSink,
    ) -> ToolkitOutcome {
        let snapshot = self.config.snapshot();
        self.on_toolkit_used_with(&snapshot, request, inventory, rng, feedback)
    }

    /// Same as [`Self::on_toolkit_used`] with an explicit config snapshot.
    pub fn on_toolkit_used_with(
        &self,
        config: &ModConfig,
        request: ToolkitUseRequest,
        inventory: &mut impl Inventory,
        rng: &mut impl Rng,
        feedback: &mut impl FeedbackSink,
    ) -> ToolkitOutcome {
        let mut interaction = Interaction::begin();
        let require_never_enhanced = !config.allow_reroll;

        // Validating
        let toolkit_stack = match inventory.item_stack(request.toolkit_slot) {
            Some(stack) if !stack.is_empty() => stack,
            _ => return interaction.abort(AbortReason::MissingToolkit, feedback),
        };
        let toolkit_remaining = toolkit_stack.quantity - 1;
        let Some(toolkit) = config.toolkits.find_by_output_code(&toolkit_stack.code) else {
            let code = toolkit_stack.code.clone();
            return interaction.abort(AbortReason::ToolkitNotRecognized { code }, feedback);
        };

        if request.target_slot >= inventory.slot_count() {
            return interaction.abort(AbortReason::NoTargetSlot, feedback);
        }
        let target = match inventory.item_stack(request.target_slot) {
            Some(item) if request.target_slot != request.toolkit_slot => item,
            _ => return interaction.abort(AbortReason::NoTarget, feedback),
        };
        if let Err(unsuitable) = check_suitability(target, require_never_enhanced, &*self.classifier)
        {
            return interaction.abort(AbortReason::Unsuitable(unsuitable), feedback);
        }
        let previous = target.state.rarity_key().map(str::to_string);
        let target_name = target.display_name().to_string();

        // Selecting
        interaction.advance(Phase::Selecting);
        let Some(rarity_key) = select(&toolkit.rarity_weights, rng) else {
            let toolkit = toolkit.code.clone();
            return interaction.abort(AbortReason::EmptyPool { toolkit }, feedback);
        };
        let Some(tier) = config.rarities.get(rarity_key) else {
            let key = rarity_key.to_string();
            return interaction.abort(AbortReason::UnknownTier { key }, feedback);
        };

        let enhancement = Enhancement {
            target_slot: request.target_slot,
            rarity_key: rarity_key.to_string(),
            rarity_name: tier.name.clone(),
            previous,
            toolkit: toolkit.code.clone(),
            toolkit_remaining,
        };
        let success_message = Feedback::Message {
            key: lang::SUCCESS_ENHANCED,
            args: vec![target_name, enhancement.rarity_name.clone()],
        };

        if self.authority == Authority::Predictive {
            tracing::debug!(rarity = %enhancement.rarity_key, "predicted toolkit outcome");
            feedback.emit(Feedback::Sound {
                asset: APPLY_SOUND,
                slot: request.target_slot,
            });
            feedback.emit(success_message);
            return ToolkitOutcome::Predicted(enhancement);
        }

        // The authoritative side re-checks right before writing.
        let still_suitable = inventory
            .item_stack(request.target_slot)
            .map(|t| check_suitability(t, require_never_enhanced, &*self.classifier));
        match still_suitable {
            Some(Ok(())) => {}
            Some(Err(unsuitable)) => {
                return interaction.abort(AbortReason::Unsuitable(unsuitable), feedback)
            }
            None => return interaction.abort(AbortReason::NoTarget, feedback),
        }

        // Mutating: every check is done, nothing below can fail.
        interaction.advance(Phase::Mutating);
        if let Some(target) = inventory.item_stack_mut(request.target_slot) {
            target.state.set_rarity(&enhancement.rarity_key);
        }
        inventory.mark_dirty(request.target_slot);
        inventory.decrement_stack(request.toolkit_slot, 1);
        inventory.mark_dirty(request.toolkit_slot);

        feedback.emit(Feedback::Sound {
            asset: APPLY_SOUND,
            slot: request.target_slot,
        });
        feedback.emit(success_message);
        interaction.advance(Phase::Consumed);

        tracing::info!(
            rarity = %enhancement.rarity_key,
            previous = ?enhancement.previous,
            toolkit = %enhancement.toolkit,
            "applied rarity"
        );
        ToolkitOutcome::Consumed(enhancement)
    }
}
