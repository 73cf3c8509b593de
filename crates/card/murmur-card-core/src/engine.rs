//! Engine: card ownership and the public tick API.
//!
//! Methods:
//! - new, mount_card, unmount_card, update (apply inputs → tick lifecycles →
//!   emit changes/events), plus read accessors for hosts and tests.

use serde::{Deserialize, Serialize};

use crate::config::{Config, StageTimings};
use crate::ids::{CardId, IdAllocator};
use crate::inputs::{CardCommand, Inputs};
use crate::lifecycle::{Stage, StageLifecycle};
use crate::modality::{DragTrack, HoldTimer, Modality, ObserveTimer, TapCounter};
use crate::outputs::{CardEvent, Change, Outputs};
use crate::spec::{CardSpec, Hook};
use crate::theme::{self, Theme};
use crate::validator::SubmitOutcome;
use crate::value::Value;

/// Per-card overrides for modality parameters and stage timings.
/// Anything left None falls back to the engine Config.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardCfg {
    #[serde(default)]
    pub tap_target: Option<u32>,
    #[serde(default)]
    pub hold_threshold: Option<f32>,
    #[serde(default)]
    pub drag_threshold: Option<f32>,
    #[serde(default)]
    pub observe_dwell: Option<f32>,
    #[serde(default)]
    pub type_rules: Option<crate::validator::TypeRules>,
    #[serde(default)]
    pub timings: Option<StageTimings>,
}

/// A mounted card instance.
#[derive(Debug)]
pub struct Card {
    pub id: CardId,
    pub spec: CardSpec,
    /// Memoized at mount; compose() is pure so re-deriving is safe but
    /// pointless.
    pub theme: Theme,
    pub lifecycle: StageLifecycle,
    pub modality: Modality,
    /// Rising-edge latch for the ModalityCompleted event.
    modality_reported: bool,
}

/// Engine (core), host-agnostic. Hosts call update() once per frame.
#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    ids: IdAllocator,
    cards: Vec<Card>,

    // Per-tick outputs
    outputs: Outputs,
    /// Events past the per-tick cap, re-emitted on later ticks in order.
    deferred: Vec<CardEvent>,
}

/// Completion and stage signals are exactly-once contracts with the host, so
/// the cap defers the overflow to the next tick rather than dropping it.
fn push_event_capped(
    outputs: &mut Outputs,
    deferred: &mut Vec<CardEvent>,
    cap: usize,
    event: CardEvent,
) {
    if outputs.events.len() < cap {
        outputs.push_event(event);
    } else {
        log::warn!("per-tick event cap {cap} reached; deferring {event:?}");
        deferred.push(event);
    }
}

impl Engine {
    /// Create a new engine with the given config.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            cards: Vec::new(),
            outputs: Outputs::default(),
            deferred: Vec::new(),
        }
    }

    /// Mount a card: compose its theme, build the modality matching the
    /// spec's hook, and start the lifecycle at Arriving.
    pub fn mount_card(&mut self, spec: CardSpec, cfg: CardCfg) -> CardId {
        let id = self.ids.alloc_card();
        let theme = theme::compose(&spec);
        let timings = cfg.timings.unwrap_or_else(|| self.cfg.timings.clone());

        let modality = match spec.hook {
            Hook::Tap => Modality::Tap(TapCounter::new(
                cfg.tap_target.unwrap_or(self.cfg.tap_target),
            )),
            Hook::Hold => Modality::Hold(HoldTimer::new(
                cfg.hold_threshold.unwrap_or(self.cfg.hold_threshold),
            )),
            Hook::Drag => Modality::Drag(DragTrack::new(
                cfg.drag_threshold.unwrap_or(self.cfg.drag_threshold),
            )),
            Hook::Type => {
                Modality::new_type(cfg.type_rules.unwrap_or_default(), self.cfg.shake_revert)
            }
            Hook::Observe => Modality::Observe(ObserveTimer::new(
                cfg.observe_dwell.unwrap_or(self.cfg.observe_dwell),
            )),
        };

        self.cards.push(Card {
            id,
            spec,
            theme,
            lifecycle: StageLifecycle::new(timings),
            modality,
            modality_reported: false,
        });
        id
    }

    /// Synchronous teardown. Every deadline owned by the card dies with it;
    /// later commands addressed to the id are ignored, and events still
    /// deferred for it are discarded.
    pub fn unmount_card(&mut self, card: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|c| c.id == card) {
            self.cards.remove(pos);
            self.deferred.retain(|e| e.card() != card);
            true
        } else {
            false
        }
    }

    /// Apply per-card commands. Modality input is accepted only while the
    /// card's interactive stage is live.
    fn apply_inputs(&mut self, inputs: Inputs) {
        let Engine {
            cards,
            outputs,
            cfg,
            deferred,
            ..
        } = self;
        for cmd in inputs.card_cmds {
            let id = cmd.card();
            let Some(card) = cards.iter_mut().find(|c| c.id == id) else {
                continue;
            };
            if card.lifecycle.is_torn_down() {
                continue;
            }
            match cmd {
                CardCommand::Advance { .. } => {
                    if let Some((from, to)) = card.lifecycle.advance() {
                        push_event_capped(
                            outputs,
                            deferred,
                            cfg.max_events_per_tick,
                            CardEvent::StageChanged { card: id, from, to },
                        );
                    }
                }
                CardCommand::Reset { .. } => {
                    card.lifecycle.reset();
                    card.modality.reset();
                    card.modality_reported = false;
                }
                // Everything below is modality input; outside the
                // interactive stage it is dropped.
                _ if card.lifecycle.stage() != Stage::Active => {}
                CardCommand::Tap { .. } => {
                    if let Modality::Tap(t) = &mut card.modality {
                        t.tap();
                    }
                }
                CardCommand::PointerDown { .. } => {
                    if let Modality::Hold(h) = &mut card.modality {
                        h.press();
                    }
                }
                CardCommand::PointerUp { .. } | CardCommand::PointerCancel { .. } => {
                    if let Modality::Hold(h) = &mut card.modality {
                        h.release();
                    }
                }
                CardCommand::PointerMove { x, width, .. } => {
                    if let Modality::Drag(d) = &mut card.modality {
                        d.move_to(x, width);
                    }
                }
                CardCommand::SetText { ref text, .. } => {
                    if let Modality::Type(v) = &mut card.modality {
                        v.on_change(text);
                    }
                }
                CardCommand::Submit { .. } => {
                    if let Modality::Type(v) = &mut card.modality {
                        match v.submit() {
                            SubmitOutcome::Accepted => push_event_capped(
                                outputs,
                                deferred,
                                cfg.max_events_per_tick,
                                CardEvent::TextAccepted {
                                    card: id,
                                    text: v.value().to_string(),
                                },
                            ),
                            SubmitOutcome::Rejected => push_event_capped(
                                outputs,
                                deferred,
                                cfg.max_events_per_tick,
                                CardEvent::TextRejected {
                                    card: id,
                                    text: v.value().to_string(),
                                    shake_count: v.shake_count(),
                                },
                            ),
                            SubmitOutcome::Ignored => {}
                        }
                    }
                }
            }
        }
    }

    /// Step the simulation by dt with given inputs, producing outputs.
    pub fn update(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        self.outputs.clear();

        // 1) Deliver events deferred by the cap on an earlier tick, oldest
        //    first.
        let carry = self.deferred.len().min(self.cfg.max_events_per_tick);
        for event in self.deferred.drain(..carry) {
            self.outputs.push_event(event);
        }

        // 2) Apply per-card commands
        self.apply_inputs(inputs);

        // 3) Tick every card: modality, then lifecycle deadlines
        let Engine {
            cards,
            outputs,
            cfg,
            deferred,
            ..
        } = self;
        let mut transitions: Vec<(Stage, Stage)> = Vec::new();
        for card in cards.iter_mut() {
            if card.lifecycle.is_torn_down() {
                continue;
            }

            if card.lifecycle.stage() == Stage::Active {
                card.modality.tick(dt);
            }

            if card.modality.completed() {
                if !card.modality_reported {
                    card.modality_reported = true;
                    push_event_capped(
                        outputs,
                        deferred,
                        cfg.max_events_per_tick,
                        CardEvent::ModalityCompleted { card: card.id },
                    );
                }
                // Manual advance out of the interactive stage; its pending
                // deadline (if any) is cancelled inside advance().
                if card.lifecycle.stage() == Stage::Active {
                    if let Some((from, to)) = card.lifecycle.advance() {
                        push_event_capped(
                            outputs,
                            deferred,
                            cfg.max_events_per_tick,
                            CardEvent::StageChanged {
                                card: card.id,
                                from,
                                to,
                            },
                        );
                    }
                }
            }

            transitions.clear();
            card.lifecycle.tick(dt, &mut transitions);
            for (from, to) in transitions.drain(..) {
                push_event_capped(
                    outputs,
                    deferred,
                    cfg.max_events_per_tick,
                    CardEvent::StageChanged {
                        card: card.id,
                        from,
                        to,
                    },
                );
            }

            if card.lifecycle.take_completion() {
                push_event_capped(
                    outputs,
                    deferred,
                    cfg.max_events_per_tick,
                    CardEvent::CardCompleted { card: card.id },
                );
            }

            // 4) Per-tick change rows: current stage and modality progress
            outputs.push_change(Change {
                card: card.id,
                key: "stage".to_string(),
                value: Value::Text(card.lifecycle.stage().key().to_string()),
            });
            outputs.push_change(Change {
                card: card.id,
                key: "progress".to_string(),
                value: Value::Float(card.modality.progress()),
            });
        }

        &self.outputs
    }

    pub fn card(&self, card: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card)
    }

    pub fn card_stage(&self, card: CardId) -> Option<Stage> {
        self.card(card).map(|c| c.lifecycle.stage())
    }

    pub fn card_theme(&self, card: CardId) -> Option<&Theme> {
        self.card(card).map(|c| &c.theme)
    }

    pub fn card_progress(&self, card: CardId) -> Option<f32> {
        self.card(card).map(|c| c.modality.progress())
    }

    /// Whether the card has reached its terminal stage.
    pub fn card_completed(&self, card: CardId) -> Option<bool> {
        self.card(card).map(|c| c.lifecycle.is_terminal())
    }
}
