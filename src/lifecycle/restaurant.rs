use crate::clients::{PassClient, WaiterClient};
use crate::cook_actor::{Cook, CookContext};
use crate::customer_actor::{Customer, CustomerContext};
use crate::framework::{admission_queue, IdGenerator, Labor, ShutdownSignal};
use crate::lifecycle::config::RestaurantConfig;
use crate::lifecycle::error::RestaurantError;
use crate::lifecycle::tracing::{EventSink, TracingSink};
use crate::model::{KitchenEvent, ServiceReport, ShutdownReason};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::Instant;
use tracing::{debug, error};

/// The coordinator for one simulated service.
///
/// `Restaurant` is responsible for:
/// - **Wiring**: building the waiter's queue, the shutdown signal and the id
///   generator, and handing each actor the clients it needs
/// - **Lifecycle**: spawning every cook and customer as its own task, closing
///   the restaurant at the deadline, and waiting for everyone to leave
/// - **Reporting**: collecting each actor's report into a [`ServiceReport`]
///
/// # Example
///
/// ```ignore
/// let config = RestaurantConfig::scaled(Duration::from_millis(50));
/// let restaurant = Restaurant::new(config)?;
///
/// // Optional: keep a handle to close early
/// let shutdown = restaurant.shutdown_signal();
///
/// let report = restaurant.run().await?;
/// println!("{} meals served", report.meals_eaten());
/// ```
pub struct Restaurant {
    config: RestaurantConfig,
    shutdown: ShutdownSignal,
    waiter: WaiterClient,
    pass: PassClient,
    ids: IdGenerator,
    sink: Arc<dyn EventSink>,
    cooking: Arc<dyn Labor>,
    eating: Arc<dyn Labor>,
    abandoning: Arc<dyn Labor>,
}

impl Restaurant {
    /// Validates `config` and sets up the shared plumbing. Nothing runs until
    /// [`run`](Self::run) is awaited.
    pub fn new(config: RestaurantConfig) -> Result<Self, RestaurantError> {
        config.validate()?;

        let shutdown = ShutdownSignal::new();
        let (to_waiter, from_waiter) = admission_queue(config.queue_capacity, shutdown.clone())?;

        Ok(Self {
            shutdown,
            waiter: WaiterClient::new(to_waiter),
            pass: PassClient::new(from_waiter),
            ids: IdGenerator::new(),
            sink: Arc::new(TracingSink),
            cooking: Arc::new(config.cooking),
            eating: Arc::new(config.eating),
            abandoning: Arc::new(config.abandoning),
            config,
        })
    }

    /// Replaces the default [`TracingSink`].
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replaces the configured cooking effort for every cook.
    pub fn with_cooking(mut self, cooking: Arc<dyn Labor>) -> Self {
        self.cooking = cooking;
        self
    }

    /// Replaces the configured eating effort for every customer.
    pub fn with_eating(mut self, eating: Arc<dyn Labor>) -> Self {
        self.eating = eating;
        self
    }

    pub fn with_abandoning(mut self, abandoning: Arc<dyn Labor>) -> Self {
        self.abandoning = abandoning;
        self
    }

    /// A handle to the closing-time signal. Closing it ends the service early
    /// with [`ShutdownReason::External`].
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Runs the service to completion.
    ///
    /// Returns once every actor has stopped. Fails only if an actor panicked
    /// or was still running when the shutdown grace period ran out.
    pub async fn run(self) -> Result<ServiceReport, RestaurantError> {
        let Restaurant {
            config,
            shutdown,
            waiter,
            pass,
            ids,
            sink,
            cooking,
            eating,
            abandoning,
        } = self;

        sink.record(KitchenEvent::Opened {
            customers: config.customers.len(),
            cooks: config.cooks.len(),
            capacity: config.queue_capacity,
        });

        // =====================================================================
        // Step 1: Arm closing time
        // =====================================================================

        let closer = Closer::new(shutdown.clone());
        if config.deadline == Some(Duration::ZERO) {
            closer.close(ShutdownReason::Deadline);
        }
        let closing = tokio::spawn(closing_time(closer.clone(), config.deadline, sink.clone()));

        // =====================================================================
        // Step 2: Start actors with injected context
        // =====================================================================

        let cooks: Vec<_> = config
            .cooks
            .iter()
            .map(|name| {
                let cook = Cook::new(name.clone());
                let ctx = CookContext {
                    pass: pass.clone(),
                    shutdown: shutdown.clone(),
                    sink: sink.clone(),
                    cooking: cooking.clone(),
                };
                (cook.name().to_string(), tokio::spawn(cook.run(ctx)))
            })
            .collect();

        let customers: Vec<_> = config
            .customers
            .iter()
            .map(|name| {
                let customer = Customer::new(
                    name.clone(),
                    config.meals_per_customer,
                    config.admission_timeout,
                );
                let ctx = CustomerContext {
                    waiter: waiter.clone(),
                    ids: ids.clone(),
                    shutdown: shutdown.clone(),
                    sink: sink.clone(),
                    eating: eating.clone(),
                    abandoning: abandoning.clone(),
                };
                (customer.name().to_string(), tokio::spawn(customer.run(ctx)))
            })
            .collect();

        let mut reaper = Reaper {
            shutdown: shutdown.clone(),
            grace: config.shutdown_grace,
            grace_ends: GraceEnds::NotStarted,
            everyone: cooks
                .iter()
                .map(|(_, handle)| handle.abort_handle())
                .chain(customers.iter().map(|(_, handle)| handle.abort_handle()))
                .chain(std::iter::once(closing.abort_handle()))
                .collect(),
        };

        // =====================================================================
        // Step 3: Wait for everyone to leave
        // =====================================================================

        let mut customer_reports = Vec::with_capacity(customers.len());
        for (name, handle) in customers {
            customer_reports.push(reaper.join(name, handle).await?);
        }

        if config.deadline.is_none() {
            closer.close(ShutdownReason::AllCustomersServed);
        }
        shutdown.closed().await;

        let mut cook_reports = Vec::with_capacity(cooks.len());
        for (name, handle) in cooks {
            cook_reports.push(reaper.join(name, handle).await?);
        }

        let reason = reaper.join("closing-time".to_string(), closing).await?;
        drop((waiter, pass));
        sink.record(KitchenEvent::Closed);

        Ok(ServiceReport {
            reason,
            customers: customer_reports,
            cooks: cook_reports,
        })
    }
}

/// Closes the shutdown signal and remembers why.
#[derive(Clone)]
struct Closer {
    shutdown: ShutdownSignal,
    reason: Arc<Mutex<Option<ShutdownReason>>>,
}

impl Closer {
    fn new(shutdown: ShutdownSignal) -> Self {
        Self {
            shutdown,
            reason: Arc::new(Mutex::new(None)),
        }
    }

    fn close(&self, reason: ShutdownReason) {
        // The lock is held across the transition so readers woken by the
        // signal always see the reason of the call that won.
        let mut slot = self.reason.lock().unwrap_or_else(|p| p.into_inner());
        if self.shutdown.close() {
            *slot = Some(reason);
        }
    }

    /// Nobody inside the restaurant closed it, so someone outside did.
    fn reason(&self) -> ShutdownReason {
        let reason = *self.reason.lock().unwrap_or_else(|p| p.into_inner());
        reason.unwrap_or(ShutdownReason::External)
    }
}

/// Closes the restaurant at the deadline (if any) and announces closing time
/// whoever closed it.
async fn closing_time(
    closer: Closer,
    deadline: Option<Duration>,
    sink: Arc<dyn EventSink>,
) -> ShutdownReason {
    match deadline {
        Some(deadline) => tokio::select! {
            biased;
            _ = closer.shutdown.closed() => {}
            _ = tokio::time::sleep(deadline) => closer.close(ShutdownReason::Deadline),
        },
        None => closer.shutdown.closed().await,
    }

    let reason = closer.reason();
    sink.record(KitchenEvent::Closing { reason });
    reason
}

/// Joins actor tasks, enforcing the shutdown grace period.
///
/// The grace period starts the first time a join observes the closed signal
/// and is shared by every later join. On any failure every task still running
/// is aborted.
struct Reaper {
    shutdown: ShutdownSignal,
    grace: Duration,
    grace_ends: GraceEnds,
    everyone: Vec<AbortHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraceEnds {
    NotStarted,
    At(Instant),
    /// The grace period reaches past anything the clock can represent.
    Never,
}

impl Reaper {
    async fn join<R>(&mut self, name: String, mut handle: JoinHandle<R>) -> Result<R, RestaurantError> {
        let joined = loop {
            match self.grace_ends {
                GraceEnds::At(grace_ends) => match tokio::time::timeout_at(grace_ends, &mut handle).await {
                    Ok(joined) => break joined,
                    Err(_) => {
                        error!(actor = %name, grace = ?self.grace, "Still running after grace period");
                        self.abort_all();
                        return Err(RestaurantError::GraceExpired { name });
                    }
                },
                GraceEnds::Never => break (&mut handle).await,
                GraceEnds::NotStarted => tokio::select! {
                    joined = &mut handle => break joined,
                    _ = self.shutdown.closed() => {
                        debug!(grace = ?self.grace, "Closing, grace period started");
                        self.grace_ends = grace_ends(Instant::now(), self.grace);
                    }
                },
            }
        };

        joined.map_err(|source| {
            error!(actor = %name, error = %source, "Actor task failed");
            self.abort_all();
            RestaurantError::ActorFailed { name, source }
        })
    }

    fn abort_all(&self) {
        for handle in &self.everyone {
            handle.abort();
        }
    }
}

fn grace_ends(now: Instant, grace: Duration) -> GraceEnds {
    match now.checked_add(grace) {
        Some(at) => GraceEnds::At(at),
        None => GraceEnds::Never,
    }
}
