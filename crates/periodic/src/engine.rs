//! # Engine
//!
//! Wires the record source, the cached layouts and the transition manager
//! together and exposes the control surface.
//!
//! ```text
//!  Uninitialized ──load ok──▶ Ready ──trigger(name)──▶ transform_to
//!        │
//!        └──load err──▶ Unavailable   (no cards, triggers ignored)
//! ```

use periodic_layout::{LayoutName, LayoutSet};
use periodic_shared::{Transform, Vec3};
use periodic_tween::{
    RandomSource, RenderSink, TickReport, TransitionManager, TransitionPlan, TransitionRequest, TransitionRequests,
    Viewport,
};
use serde_json::Value;

use crate::config::{ConfigResult, EngineConfig};
use crate::source::{Record, RecordSource};
use crate::tier::Tier;

/// Lifecycle of an [`Engine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No records loaded yet.
    Uninitialized,
    /// Loading failed. The session stays empty.
    Unavailable {
        /// Why the source failed.
        reason: String,
    },
    /// Cards exist and layouts are cached.
    Ready,
}

/// One entity as presented: identifier, tier and pass-through data.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    /// `Name`, or the record index when the record has none.
    pub id: String,
    /// Colour bracket.
    pub tier: Tier,
    /// The record the card was built from.
    pub record: Record,
}

impl Card {
    /// Builds the card for the record at `index`.
    #[must_use]
    pub fn new(index: usize, record: Record) -> Self {
        let id = record.name.clone().unwrap_or_else(|| index.to_string());
        let tier = Tier::from_net_worth(&record.net_worth);
        Self { id, tier, record }
    }

    /// A pass-through field such as `Photo` or `Country`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.record.field(key)
    }
}

/// Uniform point in the cube of edge `extent` centred on the origin.
pub fn scatter_point(random: &mut dyn RandomSource, extent: f32) -> Vec3 {
    let mut axis = || (random.next_unit() as f32 - 0.5) * extent;
    let x = axis();
    let y = axis();
    let z = axis();
    Vec3::new(x, y, z)
}

/// The card engine.
pub struct Engine {
    config: EngineConfig,
    manager: TransitionManager,
    cards: Vec<Card>,
    layouts: Option<LayoutSet>,
    state: EngineState,
    current_layout: Option<LayoutName>,
}

impl Engine {
    /// Creates an engine whose random source follows `config.jitter_seed`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Invalid`] if `config` fails validation.
    pub fn new(config: EngineConfig, sink: Box<dyn RenderSink>) -> ConfigResult<Self> {
        let random = config.random_source();
        Self::with_random(config, sink, random)
    }

    /// Creates an engine with an explicit random source.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Invalid`] if `config` fails validation.
    pub fn with_random(
        config: EngineConfig,
        sink: Box<dyn RenderSink>,
        random: Box<dyn RandomSource>,
    ) -> ConfigResult<Self> {
        config.validate()?;

        let manager = TransitionManager::new(sink, random)
            .with_easing(config.easing)
            .with_request_capacity(config.request_capacity);

        Ok(Self {
            config,
            manager,
            cards: Vec::new(),
            layouts: None,
            state: EngineState::Uninitialized,
            current_layout: None,
        })
    }

    /// Loads every record, scatters the cards and starts the initial layout.
    ///
    /// A failing source leaves the engine [`EngineState::Unavailable`].
    /// Loading only happens once; later calls are ignored.
    pub fn load(&mut self, source: &mut dyn RecordSource) -> &EngineState {
        if self.state != EngineState::Uninitialized {
            tracing::warn!(state = ?self.state, "records already loaded, ignoring load");
            return &self.state;
        }

        let records = match source.fetch() {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(%err, "record source failed, engine unavailable");
                self.state = EngineState::Unavailable { reason: err.to_string() };
                return &self.state;
            }
        };

        let extent = self.config.scatter_extent;
        for (index, record) in records.into_iter().enumerate() {
            let position = scatter_point(self.manager.random_mut(), extent);
            self.manager.spawn(Transform::at(position));
            self.cards.push(Card::new(index, record));
        }

        let layouts = LayoutSet::generate(self.cards.len());
        for name in LayoutName::ALL {
            let uncovered = layouts.uncovered(name);
            if uncovered > 0 {
                tracing::warn!(layout = %name, uncovered, "layout has fewer targets than cards");
            }
        }
        self.layouts = Some(layouts);
        self.state = EngineState::Ready;

        tracing::info!(
            cards = self.cards.len(),
            low = self.tier_count(Tier::Low),
            mid = self.tier_count(Tier::Mid),
            high = self.tier_count(Tier::High),
            "records loaded"
        );

        self.trigger(self.config.initial_layout);
        &self.state
    }

    /// Starts a transition to the named layout.
    ///
    /// Returns `None` when no records are loaded.
    pub fn trigger(&mut self, name: LayoutName) -> Option<TransitionPlan> {
        let Some(layouts) = &self.layouts else {
            tracing::warn!(layout = %name, state = ?self.state, "layout trigger ignored");
            return None;
        };

        match self.manager.transform_to(layouts.targets(name), self.config.base_duration_ms) {
            Ok(plan) => {
                self.current_layout = Some(name);
                tracing::info!(
                    layout = %name,
                    scheduled = plan.scheduled,
                    skipped = plan.skipped,
                    cancelled = plan.cancelled,
                    "transition started"
                );
                Some(plan)
            }
            Err(err) => {
                tracing::error!(layout = %name, %err, "transition rejected");
                None
            }
        }
    }

    /// A deferred request for the named layout, for handlers that only hold
    /// a [`TransitionRequests`] sender.
    #[must_use]
    pub fn layout_request(&self, name: LayoutName) -> Option<TransitionRequest> {
        let layouts = self.layouts.as_ref()?;
        Some(TransitionRequest::new(
            layouts.targets(name).clone(),
            self.config.base_duration_ms,
        ))
    }

    /// Sender for deferred transition requests.
    #[must_use]
    pub fn requests(&self) -> TransitionRequests {
        self.manager.requests()
    }

    /// Advances the animation to `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> TickReport {
        self.manager.tick(now_ms)
    }

    /// Forwards a viewport change to the sink and redraws once.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(width = viewport.width, height = viewport.height, "viewport resized");
        self.manager.resize(viewport);
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// True once records are loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == EngineState::Ready
    }

    /// True when no task or render driver is active.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.manager.is_idle()
    }

    /// Every card, in record order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Current transform of every card, indexed like [`Engine::cards`].
    #[must_use]
    pub fn transforms(&self) -> &[Transform] {
        self.manager.transforms()
    }

    /// Cached layout targets, once loaded.
    #[must_use]
    pub fn layouts(&self) -> Option<&LayoutSet> {
        self.layouts.as_ref()
    }

    /// Layout of the last successful trigger.
    #[must_use]
    pub fn current_layout(&self) -> Option<LayoutName> {
        self.current_layout
    }

    /// The configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying transition manager.
    #[must_use]
    pub fn manager(&self) -> &TransitionManager {
        &self.manager
    }

    fn tier_count(&self, tier: Tier) -> usize {
        self.cards.iter().filter(|card| card.tier == tier).count()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("cards", &self.cards.len())
            .field("current_layout", &self.current_layout)
            .field("manager", &self.manager)
            .finish_non_exhaustive()
    }
}
