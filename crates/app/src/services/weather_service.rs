//! Weather service — keeps the dashboard's weather panel up to date.
//!
//! Fetches never block state updates: the caller awaits the returned future
//! while the store keeps accepting mutations. Several fetches may be in
//! flight at once (a city change racing a unit change). How their results
//! land in the panel is decided by the [`WeatherPolicy`].

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Deserialize;
use tokio::sync::watch;

use homedash_domain::event::StateEvent;
use homedash_domain::preferences::{TemperatureUnit, UnknownVariant};
use homedash_domain::clock::{Timestamp, now};
use homedash_domain::weather::{DEFAULT_CITY, UnitSystem, WeatherReading};

use crate::ports::{EventPublisher, WeatherProvider};

/// How overlapping fetches are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherPolicy {
    /// Whichever fetch completes last wins, regardless of issue order.
    #[default]
    LastCompleted,
    /// Only the most recently issued fetch may update the panel; responses
    /// to older requests are discarded.
    LatestRequested,
}

impl FromStr for WeatherPolicy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "last-completed" => Ok(Self::LastCompleted),
            "latest-requested" => Ok(Self::LatestRequested),
            other => Err(UnknownVariant {
                kind: "weather policy",
                value: other.to_string(),
            }),
        }
    }
}

/// What the weather section of the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherPanel {
    /// City currently selected by the user.
    pub city: String,
    /// Last reading applied, kept while a new fetch is in flight.
    pub reading: Option<WeatherReading>,
    pub loading: bool,
    pub updated_at: Option<Timestamp>,
}

impl WeatherPanel {
    fn placeholder(city: &str) -> Self {
        Self {
            city: city.to_string(),
            reading: None,
            loading: false,
            updated_at: None,
        }
    }

    /// City name to display: the resolved one once a reading exists.
    #[must_use]
    pub fn display_city(&self) -> &str {
        self.reading.as_ref().map_or(&self.city, |r| &r.city)
    }

    /// `"41°C"`, or `"--°C"` before the first reading.
    ///
    /// A reading carries its own unit, so `placeholder_unit` only applies to
    /// the `--` placeholder. During a refetch after a unit change the cached
    /// reading keeps its original suffix until the new one lands.
    #[must_use]
    pub fn temperature_text(&self, placeholder_unit: TemperatureUnit) -> String {
        match &self.reading {
            Some(reading) => format!(
                "{}{}",
                reading.temperature,
                TemperatureUnit::from(reading.unit)
            ),
            None => format!("--{placeholder_unit}"),
        }
    }

    /// Long description, or `"Loading..."` before the first reading.
    #[must_use]
    pub fn description_text(&self) -> &'static str {
        self.reading
            .as_ref()
            .map_or("Loading...", WeatherReading::description)
    }
}

/// Whether a completed fetch made it into the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied(WeatherReading),
    /// A newer request was issued while this one was in flight.
    Discarded(WeatherReading),
}

impl FetchOutcome {
    #[must_use]
    pub fn reading(&self) -> &WeatherReading {
        match self {
            Self::Applied(reading) | Self::Discarded(reading) => reading,
        }
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Drives a [`WeatherProvider`] and caches its latest result.
pub struct WeatherService<W, P> {
    provider: W,
    publisher: P,
    policy: WeatherPolicy,
    panel: watch::Sender<WeatherPanel>,
    issued: AtomicU64,
    in_flight: AtomicUsize,
}

impl<W, P> WeatherService<W, P>
where
    W: WeatherProvider,
    P: EventPublisher,
{
    /// Create a service showing [`DEFAULT_CITY`] with no reading yet.
    pub fn new(provider: W, publisher: P, policy: WeatherPolicy) -> Self {
        Self::with_city(provider, publisher, policy, DEFAULT_CITY)
    }

    /// Create a service starting on `city`.
    pub fn with_city(provider: W, publisher: P, policy: WeatherPolicy, city: &str) -> Self {
        Self {
            provider,
            publisher,
            policy,
            panel: watch::Sender::new(WeatherPanel::placeholder(city)),
            issued: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn policy(&self) -> WeatherPolicy {
        self.policy
    }

    /// Clone of the current panel.
    #[must_use]
    pub fn panel(&self) -> WeatherPanel {
        self.panel.borrow().clone()
    }

    /// Receiver that observes every panel change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WeatherPanel> {
        self.panel.subscribe()
    }

    /// Select `city` and fetch its weather.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, city: &str, unit: UnitSystem) -> FetchOutcome {
        let request = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let in_flight = InFlight::enter(&self.in_flight, &self.panel);
        self.panel.send_modify(|panel| {
            panel.city = city.to_string();
            panel.loading = true;
        });

        let reading = self.provider.fetch_weather(city, unit).await;

        let remaining = in_flight.settle();
        let apply = match self.policy {
            WeatherPolicy::LastCompleted => true,
            WeatherPolicy::LatestRequested => request == self.issued.load(Ordering::SeqCst),
        };

        self.panel.send_modify(|panel| {
            panel.loading = remaining > 0;
            if apply {
                panel.reading = Some(reading.clone());
                panel.updated_at = Some(now());
            }
        });

        if apply {
            tracing::info!(
                city = %reading.city,
                temperature = reading.temperature,
                condition = reading.condition_label(),
                "weather updated"
            );
            self.publisher.publish(StateEvent::WeatherUpdated {
                reading: reading.clone(),
            });
            FetchOutcome::Applied(reading)
        } else {
            tracing::warn!(request, "discarding stale weather response");
            FetchOutcome::Discarded(reading)
        }
    }

    /// Refetch the currently selected city, e.g. after a unit change.
    pub async fn refresh(&self, unit: UnitSystem) -> FetchOutcome {
        let city = self.panel.borrow().city.clone();
        self.fetch(&city, unit).await
    }
}

/// Counts one fetch as in flight until it settles or its future is dropped.
///
/// A dropped fetch still leaves the counter and clears the loading flag once
/// nothing else is pending.
struct InFlight<'a> {
    count: &'a AtomicUsize,
    panel: &'a watch::Sender<WeatherPanel>,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn enter(count: &'a AtomicUsize, panel: &'a watch::Sender<WeatherPanel>) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self {
            count,
            panel,
            settled: false,
        }
    }

    /// Leave the in-flight set, returning how many fetches remain. The
    /// caller updates the panel itself.
    fn settle(mut self) -> usize {
        self.settled = true;
        self.count.fetch_sub(1, Ordering::SeqCst) - 1
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let remaining = self.count.fetch_sub(1, Ordering::SeqCst) - 1;
        tracing::debug!(remaining, "weather fetch abandoned");
        self.panel.send_if_modified(|panel| {
            let loading = remaining > 0;
            let changed = panel.loading != loading;
            panel.loading = loading;
            changed
        });
    }
}
