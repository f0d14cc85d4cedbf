use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// What one generated itinerary contributes to the counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItineraryStats {
    pub days: usize,
    pub free_exploration_days: usize,
    pub destination_fallback: bool,
    pub over_budget: bool,
    pub latency: Duration,
}

#[derive(Debug, Default)]
pub struct AppMetrics {
    itineraries_total: AtomicU64,
    planned_days_total: AtomicU64,
    free_exploration_days_total: AtomicU64,
    destination_fallback_total: AtomicU64,
    over_budget_total: AtomicU64,
    total_latency_micros: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub itineraries_total: u64,
    pub planned_days_total: u64,
    pub destination_fallback_total: u64,
    pub over_budget_total: u64,
    pub free_exploration_days_total: u64,
    /// Share of itineraries whose query matched no destination.
    pub fallback_rate: f64,
    pub avg_days_per_itinerary: f64,
    /// Share of planned days with no activity in the chosen category.
    pub free_exploration_share: f64,
    pub avg_latency_micros: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record_itinerary(&self, stats: ItineraryStats) {
        self.itineraries_total.fetch_add(1, Ordering::Relaxed);
        self.planned_days_total.fetch_add(stats.days as u64, Ordering::Relaxed);
        self.free_exploration_days_total
            .fetch_add(stats.free_exploration_days as u64, Ordering::Relaxed);
        if stats.destination_fallback {
            self.destination_fallback_total.fetch_add(1, Ordering::Relaxed);
        }
        if stats.over_budget {
            self.over_budget_total.fetch_add(1, Ordering::Relaxed);
        }
        self.total_latency_micros
            .fetch_add(stats.latency.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let itineraries = self.itineraries_total.load(Ordering::Relaxed);
        let days = self.planned_days_total.load(Ordering::Relaxed);
        let free_days = self.free_exploration_days_total.load(Ordering::Relaxed);
        let fallbacks = self.destination_fallback_total.load(Ordering::Relaxed);
        let latency = self.total_latency_micros.load(Ordering::Relaxed);

        MetricsSnapshot {
            itineraries_total: itineraries,
            planned_days_total: days,
            destination_fallback_total: fallbacks,
            over_budget_total: self.over_budget_total.load(Ordering::Relaxed),
            free_exploration_days_total: free_days,
            fallback_rate: ratio(fallbacks, itineraries),
            avg_days_per_itinerary: ratio(days, itineraries),
            free_exploration_share: ratio(free_days, days),
            avg_latency_micros: ratio(latency, itineraries),
        }
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,wander_api=info,wander_core=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
