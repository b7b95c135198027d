//! The request lifecycle state machine.
//!
//! The controller owns the current [`RenderState`], the last successfully
//! normalized data, and the current display unit. It reacts to exactly three
//! external events: a submit, a fetch settlement, and a unit toggle. All
//! mutation happens here; the view, provider, and preference store are
//! pluggable collaborators behind traits.

use tracing::{debug, info, warn};

use crate::config::PreferenceStore;
use crate::error::WeatherError;
use crate::format::{self, FormattedCurrent, FormattedDay};
use crate::icons::{self, ThemeName};
use crate::model::{CurrentConditions, DisplayUnit, ForecastSet, RenderState};
use crate::normalize::{self, RawPayload};
use crate::provider::WeatherProvider;

/// Presentation sink. Owns all markup concerns; receives only ready-made
/// display strings and a theme.
pub trait View {
    fn show_loading(&mut self);
    fn show_populated(
        &mut self,
        current: &FormattedCurrent,
        forecast: &[FormattedDay],
        theme: ThemeName,
    );
    fn show_error(&mut self, message: &str);
}

/// Ties a fetch settlement to the submit that started it.
///
/// Only the token from the most recent submit is honored; settlements
/// carrying an older token are discarded (last-submit-wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitToken {
    seq: u64,
}

pub struct RenderStateController {
    provider: Box<dyn WeatherProvider>,
    store: Box<dyn PreferenceStore>,
    view: Box<dyn View>,
    unit: DisplayUnit,
    state: RenderState,
    last_good: Option<(CurrentConditions, ForecastSet)>,
    seq: u64,
}

impl RenderStateController {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        store: Box<dyn PreferenceStore>,
        view: Box<dyn View>,
    ) -> Self {
        let unit = store.get();
        Self {
            provider,
            store,
            view,
            unit,
            state: RenderState::Idle,
            last_good: None,
            seq: 0,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    /// Data from the most recent successful fetch. Survives later failed
    /// submits but is never re-shown until a new success replaces it.
    pub fn last_known_good(&self) -> Option<&(CurrentConditions, ForecastSet)> {
        self.last_good.as_ref()
    }

    /// Accepts a submit, enters `Loading`, and shows the skeleton.
    ///
    /// An empty location is rejected without touching the state or the view:
    /// no loading presentation, no fetch. The returned token must accompany
    /// the matching settlement.
    pub fn begin_submit(&mut self, location: &str) -> Result<SubmitToken, WeatherError> {
        if location.is_empty() {
            return Err(WeatherError::EmptyLocation);
        }

        self.seq += 1;
        debug!(seq = self.seq, location, "submit accepted");
        self.state = RenderState::Loading;
        self.view.show_loading();
        Ok(SubmitToken { seq: self.seq })
    }

    /// Settles the fetch started by [`begin_submit`](Self::begin_submit).
    ///
    /// Stale settlements (a newer submit has started since) are discarded
    /// without touching state, cache, or view.
    pub fn complete_submit(
        &mut self,
        token: SubmitToken,
        outcome: Result<RawPayload, WeatherError>,
    ) {
        if token.seq != self.seq {
            debug!(stale = token.seq, current = self.seq, "discarding superseded fetch result");
            return;
        }

        let normalized = outcome.and_then(|raw| {
            let current = normalize::extract_current(&raw)?;
            let forecast = normalize::extract_forecast(&raw)?;
            Ok((current, forecast))
        });

        match normalized {
            Ok((current, forecast)) => {
                info!(seq = token.seq, location = %current.location, "populated");
                self.last_good = Some((current.clone(), forecast.clone()));
                self.render_populated(&current, &forecast);
                self.state = RenderState::Populated { current, forecast };
            }
            Err(err) => {
                warn!(seq = token.seq, error = %err, "submit failed");
                let message = err.to_string();
                self.view.show_error(&message);
                self.state = RenderState::Failed(message);
            }
        }
    }

    /// Runs one full submit: validate, show loading, fetch, settle.
    ///
    /// An empty location surfaces its message through the view and leaves
    /// the state untouched.
    pub async fn submit(&mut self, location: &str) {
        let token = match self.begin_submit(location) {
            Ok(token) => token,
            Err(err) => {
                self.view.show_error(&err.to_string());
                return;
            }
        };

        let outcome = self.provider.fetch_raw(location).await;
        self.complete_submit(token, outcome);
    }

    /// Flips and persists the display unit.
    ///
    /// When populated, re-formats the cached data and re-renders without any
    /// network call; otherwise there is nothing to re-render and only the
    /// preference changes.
    pub fn toggle_unit(&mut self) -> DisplayUnit {
        self.unit = self.unit.toggled();
        if let Err(err) = self.store.set(self.unit) {
            warn!(error = %err, "failed to persist unit preference");
        }
        info!(unit = %self.unit, "display unit toggled");

        let snapshot = match &self.state {
            RenderState::Populated { current, forecast } => {
                Some((current.clone(), forecast.clone()))
            }
            _ => None,
        };
        if let Some((current, forecast)) = snapshot {
            self.render_populated(&current, &forecast);
        }

        self.unit
    }

    fn render_populated(&mut self, current: &CurrentConditions, forecast: &ForecastSet) {
        let formatted_current = format::format_current(current, self.unit);
        let formatted_days = format::format_forecast(forecast, self.unit);
        let theme = icons::theme_for(current.icon_code.as_deref());
        self.view.show_populated(&formatted_current, &formatted_days, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryPreferences;
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum ViewEvent {
        Loading,
        Populated {
            location: String,
            temperature: String,
            wind_speed: String,
            theme: ThemeName,
            day_count: usize,
        },
        Error(String),
    }

    #[derive(Clone, Default)]
    struct RecordingView {
        events: Rc<RefCell<Vec<ViewEvent>>>,
    }

    impl View for RecordingView {
        fn show_loading(&mut self) {
            self.events.borrow_mut().push(ViewEvent::Loading);
        }

        fn show_populated(
            &mut self,
            current: &FormattedCurrent,
            forecast: &[FormattedDay],
            theme: ThemeName,
        ) {
            self.events.borrow_mut().push(ViewEvent::Populated {
                location: current.location.clone(),
                temperature: current.temperature.clone(),
                wind_speed: current.wind_speed.clone(),
                theme,
                day_count: forecast.len(),
            });
        }

        fn show_error(&mut self, message: &str) {
            self.events.borrow_mut().push(ViewEvent::Error(message.to_string()));
        }
    }

    #[derive(Debug)]
    struct StaticProvider {
        payload: RawPayload,
    }

    #[async_trait]
    impl WeatherProvider for StaticProvider {
        async fn fetch_raw(&self, _location: &str) -> Result<RawPayload, WeatherError> {
            Ok(self.payload.clone())
        }
    }

    fn payload_for(address: &str) -> RawPayload {
        serde_json::from_value(json!({
            "resolvedAddress": address,
            "currentConditions": {
                "temp": 72.4,
                "feelslike": 75.1,
                "conditions": "Clear",
                "humidity": 45.0,
                "uvindex": 5.0,
                "windspeed": 10.0,
                "icon": "clear-day"
            },
            "days": [
                { "datetime": "2024-01-14", "tempmax": 50.0, "tempmin": 40.0 },
                { "datetime": "2024-01-15", "tempmax": 51.0, "tempmin": 40.0 },
                { "datetime": "2024-01-16", "tempmax": 47.0, "tempmin": 35.0 },
                { "datetime": "2024-01-17", "tempmax": 44.0, "tempmin": 33.0 }
            ]
        }))
        .expect("test payload should deserialize")
    }

    fn controller_with(
        provider: Box<dyn WeatherProvider>,
    ) -> (RenderStateController, Rc<RefCell<Vec<ViewEvent>>>) {
        let view = RecordingView::default();
        let events = Rc::clone(&view.events);
        let controller = RenderStateController::new(
            provider,
            Box::new(MemoryPreferences::default()),
            Box::new(view),
        );
        (controller, events)
    }

    fn test_controller() -> (RenderStateController, Rc<RefCell<Vec<ViewEvent>>>) {
        controller_with(Box::new(StaticProvider { payload: payload_for("London") }))
    }

    #[test]
    fn starts_idle_with_persisted_unit() {
        let (controller, events) = test_controller();
        assert_eq!(*controller.state(), RenderState::Idle);
        assert_eq!(controller.unit(), DisplayUnit::Imperial);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn empty_submit_changes_nothing() {
        let (mut controller, events) = test_controller();

        let err = controller.begin_submit("").unwrap_err();

        assert_eq!(err, WeatherError::EmptyLocation);
        assert_eq!(*controller.state(), RenderState::Idle);
        assert!(events.borrow().is_empty(), "no loading, no fetch");
    }

    #[test]
    fn submit_shows_loading_before_settlement() {
        let (mut controller, events) = test_controller();

        controller.begin_submit("London").unwrap();

        assert_eq!(*controller.state(), RenderState::Loading);
        assert_eq!(*events.borrow(), vec![ViewEvent::Loading]);
    }

    #[test]
    fn successful_settlement_populates_and_caches() {
        let (mut controller, events) = test_controller();

        let token = controller.begin_submit("London").unwrap();
        controller.complete_submit(token, Ok(payload_for("London")));

        assert!(matches!(controller.state(), RenderState::Populated { .. }));
        let (current, forecast) = controller.last_known_good().expect("cache filled");
        assert_eq!(current.location, "London");
        assert_eq!(forecast.days().len(), 3);

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            ViewEvent::Populated {
                location: "London".to_string(),
                temperature: "72\u{b0}F".to_string(),
                wind_speed: "10 mph".to_string(),
                theme: ThemeName::Sunny,
                day_count: 3,
            }
        );
    }

    #[test]
    fn fetch_failure_shows_error_only() {
        let (mut controller, events) = test_controller();

        let token = controller.begin_submit("Nowhereville").unwrap();
        controller.complete_submit(
            token,
            Err(WeatherError::NotFound("Nowhereville".to_string())),
        );

        assert_eq!(
            *controller.state(),
            RenderState::Failed("Location \"Nowhereville\" not found".to_string())
        );
        assert_eq!(
            events.borrow().last(),
            Some(&ViewEvent::Error("Location \"Nowhereville\" not found".to_string()))
        );
    }

    #[test]
    fn failure_then_success_recovers() {
        let (mut controller, _events) = test_controller();

        let token = controller.begin_submit("Nowhereville").unwrap();
        controller.complete_submit(
            token,
            Err(WeatherError::NotFound("Nowhereville".to_string())),
        );
        assert!(matches!(controller.state(), RenderState::Failed(_)));

        let token = controller.begin_submit("London").unwrap();
        controller.complete_submit(token, Ok(payload_for("London")));
        assert!(matches!(controller.state(), RenderState::Populated { .. }));
    }

    #[test]
    fn malformed_payload_fails_without_partial_render() {
        let (mut controller, events) = test_controller();

        let token = controller.begin_submit("London").unwrap();
        let no_current: RawPayload =
            serde_json::from_value(json!({ "days": [] })).expect("deserializes");
        controller.complete_submit(token, Ok(no_current));

        assert!(matches!(controller.state(), RenderState::Failed(_)));
        assert!(matches!(events.borrow().last(), Some(ViewEvent::Error(_))));
        assert!(controller.last_known_good().is_none());
    }

    #[test]
    fn stale_settlement_is_discarded() {
        let (mut controller, events) = test_controller();

        let token_a = controller.begin_submit("Paris").unwrap();
        let token_b = controller.begin_submit("London").unwrap();

        controller.complete_submit(token_b, Ok(payload_for("London")));
        controller.complete_submit(token_a, Ok(payload_for("Paris")));

        let (current, _) = controller.last_known_good().expect("cache filled");
        assert_eq!(current.location, "London", "A resolved after B and must lose");

        let events = events.borrow();
        let populated: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ViewEvent::Populated { .. }))
            .collect();
        assert_eq!(populated.len(), 1, "the stale settlement must not render");
    }

    #[test]
    fn stale_failure_cannot_overwrite_newer_success() {
        let (mut controller, _events) = test_controller();

        let token_a = controller.begin_submit("Paris").unwrap();
        let token_b = controller.begin_submit("London").unwrap();

        controller.complete_submit(token_b, Ok(payload_for("London")));
        controller.complete_submit(
            token_a,
            Err(WeatherError::ProviderUnavailable("timeout".to_string())),
        );

        assert!(matches!(controller.state(), RenderState::Populated { .. }));
    }

    #[test]
    fn failed_submit_retains_cache_but_does_not_display_it() {
        let (mut controller, events) = test_controller();

        let token = controller.begin_submit("London").unwrap();
        controller.complete_submit(token, Ok(payload_for("London")));

        let token = controller.begin_submit("Nowhereville").unwrap();
        controller.complete_submit(
            token,
            Err(WeatherError::NotFound("Nowhereville".to_string())),
        );

        assert!(matches!(controller.state(), RenderState::Failed(_)));
        let (current, _) = controller.last_known_good().expect("cache survives failure");
        assert_eq!(current.location, "London");
        assert!(
            matches!(events.borrow().last(), Some(ViewEvent::Error(_))),
            "only the error is shown"
        );
    }

    #[test]
    fn toggle_reformats_cached_data_without_refetch() {
        let (mut controller, events) = test_controller();

        let token = controller.begin_submit("London").unwrap();
        controller.complete_submit(token, Ok(payload_for("London")));

        controller.toggle_unit();

        let events = events.borrow();
        let last = events.last().unwrap();
        assert_eq!(
            *last,
            ViewEvent::Populated {
                location: "London".to_string(),
                temperature: "22\u{b0}C".to_string(),
                wind_speed: "16 km/h".to_string(),
                theme: ThemeName::Sunny,
                day_count: 3,
            }
        );
    }

    #[test]
    fn double_toggle_restores_original_strings() {
        let (mut controller, events) = test_controller();

        let token = controller.begin_submit("London").unwrap();
        controller.complete_submit(token, Ok(payload_for("London")));
        let original = events.borrow().last().cloned().unwrap();

        controller.toggle_unit();
        controller.toggle_unit();

        assert_eq!(controller.unit(), DisplayUnit::Imperial);
        assert_eq!(events.borrow().last().cloned().unwrap(), original);
    }

    #[test]
    fn toggle_in_failed_state_persists_but_renders_nothing() {
        let (mut controller, events) = test_controller();

        let token = controller.begin_submit("London").unwrap();
        controller.complete_submit(token, Ok(payload_for("London")));
        let token = controller.begin_submit("Nowhereville").unwrap();
        controller.complete_submit(
            token,
            Err(WeatherError::NotFound("Nowhereville".to_string())),
        );
        let before = events.borrow().len();

        let unit = controller.toggle_unit();

        assert_eq!(unit, DisplayUnit::Metric);
        assert!(matches!(controller.state(), RenderState::Failed(_)));
        assert_eq!(events.borrow().len(), before, "cached data is not re-shown");
    }

    #[test]
    fn toggle_without_data_persists_but_renders_nothing() {
        let (mut controller, events) = test_controller();

        let unit = controller.toggle_unit();

        assert_eq!(unit, DisplayUnit::Metric);
        assert_eq!(controller.unit(), DisplayUnit::Metric);
        assert!(events.borrow().is_empty());
    }

    #[tokio::test]
    async fn async_submit_drives_the_full_cycle() {
        let (mut controller, events) = test_controller();

        controller.submit("London").await;

        assert!(matches!(controller.state(), RenderState::Populated { .. }));
        let events = events.borrow();
        assert_eq!(events[0], ViewEvent::Loading);
        assert!(matches!(events[1], ViewEvent::Populated { .. }));
    }

    #[tokio::test]
    async fn async_submit_surfaces_empty_location_via_view() {
        let (mut controller, events) = test_controller();

        controller.submit("").await;

        assert_eq!(*controller.state(), RenderState::Idle);
        assert_eq!(
            *events.borrow(),
            vec![ViewEvent::Error("No location provided".to_string())]
        );
    }
}
