//! Main simulation world that ties the building and a dispatch policy together
//!
//! The world plays the environment: it moves cars, spawns passengers, lets
//! them board and alight, and talks to the policy only through
//! notifications and commands.

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::collections::BTreeMap;

use crate::dispatch::{
    Command, DispatchPolicy, ElevatorEvent, ElevatorId, ElevatorSnapshot, Floor, Notification,
    PassengerId,
};

use super::config::BuildingConfig;
use super::elevator::{ElevatorUpdateResult, SimElevator};
use super::passenger::SimPassenger;
use super::stats::SimulationStats;

/// The main simulation world
pub struct SimWorld<P: DispatchPolicy> {
    pub config: BuildingConfig,

    /// All elevator cars, indexed by id
    pub elevators: Vec<SimElevator>,

    /// Passengers waiting at each floor, in arrival order
    pub waiting: BTreeMap<Floor, Vec<SimPassenger>>,

    /// The dispatcher under test
    policy: P,

    /// Notifications raised outside of `tick` (manually added passengers)
    inbox: Vec<Notification>,

    /// Whether random passengers are spawned
    pub spawning: bool,

    next_passenger_id: usize,

    /// Ticks elapsed
    pub tick: u64,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,

    pub stats: SimulationStats,
}

impl<P: DispatchPolicy> SimWorld<P> {
    fn new_internal(config: BuildingConfig, policy: P, rng: Option<StdRng>) -> Result<Self> {
        config.validate().context("Invalid building configuration")?;

        let elevators = (0..config.elevators)
            .map(|index| SimElevator::new(ElevatorId(index), 0, config.capacity))
            .collect();

        let mut world = Self {
            config,
            elevators,
            waiting: BTreeMap::new(),
            policy,
            inbox: Vec::new(),
            spawning: true,
            next_passenger_id: 0,
            tick: 0,
            rng,
            stats: SimulationStats::default(),
        };

        let snapshots = world.snapshots();
        let commands = world.policy.on_init(&snapshots);
        world.apply_commands(commands);

        Ok(world)
    }

    pub fn new(config: BuildingConfig, policy: P) -> Result<Self> {
        Self::new_internal(config, policy, None)
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(config: BuildingConfig, policy: P, seed: u64) -> Result<Self> {
        Self::new_internal(config, policy, Some(StdRng::seed_from_u64(seed)))
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Get a random floor, using seeded RNG if available
    fn random_floor(&mut self) -> Floor {
        let floors = self.config.floors;
        match &mut self.rng {
            Some(rng) => rng.random_range(0..floors),
            None => rand::rng().random_range(0..floors),
        }
    }

    /// Roll for a passenger spawn, using seeded RNG if available
    fn should_spawn(&mut self) -> bool {
        let rate = self.config.spawn_rate;
        match &mut self.rng {
            Some(rng) => rng.random_bool(rate),
            None => rand::rng().random_bool(rate),
        }
    }

    fn next_passenger_id(&mut self) -> PassengerId {
        let id = PassengerId(self.next_passenger_id);
        self.next_passenger_id += 1;
        id
    }

    pub fn snapshots(&self) -> Vec<ElevatorSnapshot> {
        self.elevators.iter().map(SimElevator::snapshot).collect()
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.values().map(Vec::len).sum()
    }

    pub fn riding_count(&self) -> usize {
        self.elevators.iter().map(|e| e.passengers.len()).sum()
    }

    /// True when nobody is waiting or riding
    pub fn is_drained(&self) -> bool {
        self.waiting_count() == 0 && self.riding_count() == 0 && self.inbox.is_empty()
    }

    /// Place a passenger at `origin`; the call is announced on the next tick
    pub fn add_passenger(&mut self, origin: Floor, destination: Floor) -> Result<PassengerId> {
        if !self.config.contains_floor(origin) || !self.config.contains_floor(destination) {
            bail!(
                "Floors {} -> {} outside building of {} floors",
                origin,
                destination,
                self.config.floors
            );
        }
        if origin == destination {
            bail!("Passenger origin and destination are both floor {}", origin);
        }

        let id = self.next_passenger_id();
        let passenger = SimPassenger::new(id, origin, destination, self.tick);
        self.waiting.entry(origin).or_default().push(passenger);
        self.inbox.push(Notification::RequestArrived(passenger.request()));
        self.stats.record_spawn();
        Ok(id)
    }

    fn spawn_random_passenger(&mut self) {
        if !self.spawning || !self.should_spawn() {
            return;
        }

        let origin = self.random_floor();
        let mut destination = self.random_floor();
        while destination == origin {
            destination = self.random_floor();
        }

        if let Err(e) = self.add_passenger(origin, destination) {
            warn!("Failed to spawn passenger: {:#}", e);
        }
    }

    /// Apply a command coming back from the policy
    pub fn apply_command(&mut self, command: Command) -> Result<()> {
        let Command::MoveToFloor {
            elevator,
            floor,
            immediate,
        } = command;

        if !self.config.contains_floor(floor) {
            bail!("{} sent to floor {} outside the building", elevator, floor);
        }

        let car = self
            .elevators
            .get_mut(elevator.0)
            .with_context(|| format!("Elevator {} not found", elevator))?;
        car.command(floor, immediate);
        self.stats.total_commands_issued += 1;
        debug!("{} -> floor {}{}", elevator, floor, if immediate { " (immediate)" } else { "" });
        Ok(())
    }

    fn apply_commands(&mut self, commands: Vec<Command>) {
        for command in commands {
            if let Err(e) = self.apply_command(command) {
                self.stats.total_dispatch_errors += 1;
                warn!("Dropped command {:?}: {:#}", command, e);
            }
        }
    }

    /// Unload and load passengers of the car at `index` resting on `floor`
    fn exchange_passengers(&mut self, index: usize, floor: Floor) -> Vec<Notification> {
        let mut notifications = Vec::new();
        let tick = self.tick;
        let car = &mut self.elevators[index];

        for passenger in car.unload(floor) {
            let boarded_at = passenger.boarded_at.unwrap_or(passenger.spawned_at);
            self.stats.record_delivery(tick - boarded_at);
            notifications.push(Notification::Elevator(ElevatorEvent::PassengerAlighted {
                elevator: car.id,
                passenger: passenger.id,
                destination: passenger.destination,
            }));
        }

        if let Some(queue) = self.waiting.get_mut(&floor) {
            let boarding = car.free_space().min(queue.len());
            for mut passenger in queue.drain(..boarding) {
                passenger.boarded_at = Some(tick);
                self.stats.record_boarding(tick - passenger.spawned_at);
                notifications.push(Notification::Elevator(ElevatorEvent::PassengerBoarded {
                    elevator: car.id,
                    passenger: passenger.id,
                    origin: passenger.origin,
                    destination: passenger.destination,
                }));
                car.passengers.push(passenger);
            }
            if queue.is_empty() {
                self.waiting.remove(&floor);
            }
        }

        notifications
    }

    fn deliver(&mut self, notifications: Vec<Notification>) {
        for notification in notifications {
            match self.policy.notify(notification) {
                Ok(commands) => self.apply_commands(commands),
                Err(e) => {
                    self.stats.total_dispatch_errors += 1;
                    warn!("Policy rejected {:?}: {:#}", notification, e);
                }
            }
        }
    }

    /// Advance the world by one tick
    pub fn tick(&mut self) {
        self.tick += 1;

        self.spawn_random_passenger();
        let mut notifications = std::mem::take(&mut self.inbox);

        let speed = self.config.speed;
        for index in 0..self.elevators.len() {
            let id = self.elevators[index].id;
            match self.elevators[index].update(speed) {
                ElevatorUpdateResult::Arrived(floor) => {
                    notifications.push(Notification::Elevator(ElevatorEvent::Stopped {
                        elevator: id,
                        floor,
                    }));
                    notifications.extend(self.exchange_passengers(index, floor));
                }
                ElevatorUpdateResult::BecameIdle => {
                    notifications.push(Notification::Elevator(ElevatorEvent::Idle { elevator: id }));
                }
                ElevatorUpdateResult::Moving | ElevatorUpdateResult::Resting => {}
            }
        }

        self.deliver(notifications);

        let snapshots = self.snapshots();
        let commands = self.policy.on_tick_end(&snapshots);
        self.apply_commands(commands);
    }

    /// Stop spawning and tick until everybody is delivered
    /// Returns the number of extra ticks run, or an error after `max_ticks`
    pub fn run_until_drained(&mut self, max_ticks: u64) -> Result<u64> {
        self.spawning = false;
        for extra in 0..max_ticks {
            if self.is_drained() {
                return Ok(extra);
            }
            self.tick();
        }
        if self.is_drained() {
            return Ok(max_ticks);
        }
        bail!(
            "{} passenger(s) still waiting and {} riding after {} extra ticks",
            self.waiting_count(),
            self.riding_count(),
            max_ticks
        )
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Elevator Simulation Summary ===");
        println!("Tick: {}", self.tick);
        println!(
            "Floors: {}, Elevators: {}",
            self.config.floors,
            self.elevators.len()
        );
        println!(
            "Waiting: {}, Riding: {}, Delivered: {}/{}",
            self.waiting_count(),
            self.riding_count(),
            self.stats.total_passengers_delivered,
            self.stats.total_passengers_spawned
        );
        println!();

        println!("--- Elevators ---");
        for car in &self.elevators {
            println!(
                "  {}: position={:.1}, target={}, passengers={}/{}",
                car.id,
                car.position,
                car.target
                    .map(|floor| floor.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                car.passengers.len(),
                car.capacity
            );
        }

        if !self.waiting.is_empty() {
            println!("--- Waiting ---");
            for (floor, queue) in &self.waiting {
                println!("  Floor {}: {} passenger(s)", floor, queue.len());
            }
        }
    }

    /// Draw the elevator shafts in the terminal
    pub fn draw_shafts(&self) {
        println!("\n=== Shafts ===");
        println!("Legend: [n]=Car with n passengers, |=Shaft, w=Waiting passengers");
        println!();
        for floor in (0..self.config.floors).rev() {
            let mut line = format!("{:>3} ", floor);
            for car in &self.elevators {
                if car.snapshot().floor() == floor {
                    line.push_str(&format!("[{}]", car.passengers.len()));
                } else {
                    line.push_str(" | ");
                }
            }
            let waiting = self.waiting.get(&floor).map_or(0, Vec::len);
            if waiting > 0 {
                line.push_str(&format!("  w{}", waiting));
            }
            println!("{}", line);
        }
        println!();
    }
}
