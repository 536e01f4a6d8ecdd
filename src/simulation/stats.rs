//! Run statistics for the headless harness

use log::info;

/// Counters collected over a simulation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    pub total_passengers_spawned: u32,
    pub total_passengers_boarded: u32,
    pub total_passengers_delivered: u32,
    pub total_commands_issued: u32,
    pub total_dispatch_errors: u32,
    total_wait_ticks: u64,
    total_travel_ticks: u64,
    pub max_wait_ticks: u64,
}

impl SimulationStats {
    pub fn record_spawn(&mut self) {
        self.total_passengers_spawned += 1;
    }

    pub fn record_boarding(&mut self, wait_ticks: u64) {
        self.total_passengers_boarded += 1;
        self.total_wait_ticks += wait_ticks;
        self.max_wait_ticks = self.max_wait_ticks.max(wait_ticks);
    }

    pub fn record_delivery(&mut self, travel_ticks: u64) {
        self.total_passengers_delivered += 1;
        self.total_travel_ticks += travel_ticks;
    }

    pub fn average_wait_ticks(&self) -> f64 {
        if self.total_passengers_boarded == 0 {
            return 0.0;
        }
        self.total_wait_ticks as f64 / self.total_passengers_boarded as f64
    }

    pub fn average_travel_ticks(&self) -> f64 {
        if self.total_passengers_delivered == 0 {
            return 0.0;
        }
        self.total_travel_ticks as f64 / self.total_passengers_delivered as f64
    }

    /// Share of spawned passengers that reached their destination, in percent
    pub fn delivery_rate(&self) -> f64 {
        if self.total_passengers_spawned == 0 {
            return 0.0;
        }
        self.total_passengers_delivered as f64 / self.total_passengers_spawned as f64 * 100.0
    }

    /// Log the final statistics
    pub fn log_summary(&self, ticks: u64) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Ticks run: {}", ticks);
        info!("Total passengers spawned: {}", self.total_passengers_spawned);
        info!("Total passengers delivered: {}", self.total_passengers_delivered);
        info!("Average wait: {:.1} ticks", self.average_wait_ticks());
        info!("Max wait: {} ticks", self.max_wait_ticks);
        info!("Average travel: {:.1} ticks", self.average_travel_ticks());
        info!("Commands issued: {}", self.total_commands_issued);
        info!("Dispatch errors: {}", self.total_dispatch_errors);
        info!("Delivery rate: {:.1}%", self.delivery_rate());
    }
}
