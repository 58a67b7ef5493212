//! Sync driver for the `read` command.
//!
//! # Design Overview
//!
//! A read is a single pass over a small state machine:
//!
//! ```text
//! INIT ──► USERS (+ inline PURCHASES) ──► PRODUCTS ──► DONE
//! ```
//!
//! 1. The configured catalog is resolved into the set of enabled streams.
//!    Unknown stream names and Purchases without Users are rejected before
//!    anything is emitted.
//! 2. Users resume from the checkpointed cursor and the purchase counter
//!    resumes from the checkpointed `purchases_count`.
//! 3. Each user is followed directly by its purchases. Every
//!    `records_per_slice` users a STATE message is emitted; the loop stops
//!    after `records_per_sync` users or when `count` users exist in total.
//! 4. Final Users and Purchases checkpoints are emitted, then the product
//!    catalog with its own checkpoint.
//!
//! # Checkpoint Management
//!
//! The platform has no per-stream state, so every STATE message carries the
//! full [`SyncState`]: the prior state merged with every update made so far.
//!
//! # Laziness
//!
//! [`SyncIterator`] generates one user step per pull. Messages produced by a
//! step (the user, its purchases and any due checkpoint) are buffered and
//! handed out one at a time before the next step runs.

use checkpoint::{Checkpoint, ProductsCheckpoint, PurchasesCheckpoint, SyncState, UsersCheckpoint};
use chrono::{DateTime, Utc};
use faker_generator::{FakerGenerator, RecordData};
use source_protocol::{ConfiguredCatalog, Message, RecordMessage, StreamName};
use std::collections::{BTreeSet, VecDeque};

use crate::{SourceConfig, SourceError};

/// Start a read.
///
/// # Errors
///
/// Fails before producing anything if the catalog names an unknown stream,
/// enables Purchases without Users, or the prior state holds an invalid
/// checkpoint for one of the streams.
pub fn read(
    config: &SourceConfig,
    catalog: &ConfiguredCatalog,
    state: SyncState,
) -> Result<SyncIterator, SourceError> {
    read_at(config, catalog, state, Utc::now())
}

/// Start a read with `now` as the upper bound for purchase timestamps.
pub fn read_at(
    config: &SourceConfig,
    catalog: &ConfiguredCatalog,
    state: SyncState,
    now: DateTime<Utc>,
) -> Result<SyncIterator, SourceError> {
    let streams = enabled_streams(catalog)?;

    let users_enabled = streams.contains(&StreamName::Users);
    let purchases_enabled = streams.contains(&StreamName::Purchases);
    let products_enabled = streams.contains(&StreamName::Products);

    if purchases_enabled && !users_enabled {
        return Err(SourceError::Configuration(
            "Purchases stream cannot be enabled without Users stream".to_string(),
        ));
    }

    let cursor = state
        .get_or_default::<UsersCheckpoint>()
        .map_err(|e| SourceError::State(format!("{e:#}")))?
        .cursor;
    let purchases_count = state
        .get_or_default::<PurchasesCheckpoint>()
        .map_err(|e| SourceError::State(format!("{e:#}")))?
        .purchases_count;

    if state.is_empty() {
        tracing::info!("No prior state, starting from the first user");
    }
    tracing::info!(
        "Starting read of {:?}: cursor={cursor}, count={}, purchases_count={purchases_count}",
        streams,
        config.count
    );

    let generator = FakerGenerator::new(config.seed, cursor)?.with_now(now);

    Ok(SyncIterator {
        config: config.clone(),
        generator,
        state,
        users_enabled,
        purchases_enabled,
        products_enabled,
        phase: Phase::Users,
        pending: VecDeque::new(),
        total_records: cursor,
        records_in_sync: 0,
        records_in_page: 0,
        purchases_count,
    })
}

/// Resolve the configured stream names.
fn enabled_streams(catalog: &ConfiguredCatalog) -> Result<BTreeSet<StreamName>, SourceError> {
    catalog
        .streams
        .iter()
        .map(|configured| configured.stream.stream_name().map_err(SourceError::from))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Users,
    Products,
    Done,
}

/// Lazy sequence of RECORD and STATE messages for one read.
///
/// Yields `Err` at most once; the sequence ends right after an error.
pub struct SyncIterator {
    config: SourceConfig,
    generator: FakerGenerator,
    state: SyncState,
    users_enabled: bool,
    purchases_enabled: bool,
    products_enabled: bool,
    phase: Phase,
    pending: VecDeque<Message>,
    /// Users emitted across all syncs, i.e. the cursor
    total_records: u64,
    /// Users emitted by this read
    records_in_sync: u64,
    /// Users emitted since the last checkpoint
    records_in_page: u64,
    purchases_count: u64,
}

impl SyncIterator {
    /// Consume the iterator, returning the combined state.
    pub fn into_state(self) -> SyncState {
        self.state
    }

    fn users_remaining(&self) -> bool {
        let below_count = self.generator.current_index() < self.config.count;
        let below_cap = self.config.records_per_sync == 0
            || self.records_in_sync < self.config.records_per_sync;
        below_count && below_cap
    }

    fn step_user(&mut self) -> Result<(), SourceError> {
        let user = self.generator.next_user();
        self.push_record(StreamName::Users, &user)?;
        self.total_records += 1;
        self.records_in_sync += 1;
        self.records_in_page += 1;

        if self.purchases_enabled {
            for purchase in self.generator.purchases_for(&user, self.purchases_count) {
                self.push_record(StreamName::Purchases, &purchase)?;
                self.purchases_count += 1;
            }
        }

        if self.config.records_per_slice != 0
            && self.records_in_page == self.config.records_per_slice
        {
            self.push_users_checkpoint()?;
            self.records_in_page = 0;
        }

        Ok(())
    }

    fn finish_users(&mut self) -> Result<(), SourceError> {
        self.push_users_checkpoint()?;

        if self.purchases_enabled {
            let purchases = self.purchases_checkpoint();
            self.push_checkpoint(&purchases)?;
        }

        tracing::info!(
            "Finished Users: emitted {} users in this sync, cursor={}, purchases_count={}",
            self.records_in_sync,
            self.total_records,
            self.purchases_count
        );
        Ok(())
    }

    fn emit_products(&mut self) -> Result<(), SourceError> {
        let products = self.generator.products()?;
        for product in &products {
            self.push_record(StreamName::Products, product)?;
        }

        self.push_checkpoint(&ProductsCheckpoint {
            product_count: products.len() as u64,
        })?;

        tracing::info!("Finished Products: emitted {} products", products.len());
        Ok(())
    }

    fn push_record<T: RecordData>(
        &mut self,
        stream: StreamName,
        entity: &T,
    ) -> Result<(), SourceError> {
        let data = entity.to_record_data()?;
        self.pending
            .push_back(Message::record(RecordMessage::new(stream, data, emitted_at())));
        Ok(())
    }

    fn purchases_checkpoint(&self) -> PurchasesCheckpoint {
        PurchasesCheckpoint {
            purchases_count: self.purchases_count,
        }
    }

    /// Emit the Users checkpoint. The purchase counter is folded into the
    /// same state so resuming from any Users checkpoint continues purchase ids.
    fn push_users_checkpoint(&mut self) -> Result<(), SourceError> {
        if self.purchases_enabled {
            let purchases = self.purchases_checkpoint();
            self.state
                .update(&purchases)
                .map_err(|e| SourceError::State(format!("{e:#}")))?;
        }
        self.push_checkpoint(&UsersCheckpoint {
            cursor: self.total_records,
            seed: self.config.seed,
        })
    }

    fn push_checkpoint<C: Checkpoint>(&mut self, checkpoint: &C) -> Result<(), SourceError> {
        self.state
            .update(checkpoint)
            .map_err(|e| SourceError::State(format!("{e:#}")))?;
        self.pending.push_back(self.state.to_message());
        Ok(())
    }

    /// Run the next step of the state machine.
    fn advance(&mut self) -> Result<(), SourceError> {
        match self.phase {
            Phase::Users => {
                if !self.users_enabled {
                    self.phase = Phase::Products;
                } else if self.users_remaining() {
                    self.step_user()?;
                } else {
                    self.finish_users()?;
                    self.phase = Phase::Products;
                }
            }
            Phase::Products => {
                if self.products_enabled {
                    self.emit_products()?;
                }
                self.phase = Phase::Done;
            }
            Phase::Done => {}
        }
        Ok(())
    }
}

impl Iterator for SyncIterator {
    type Item = Result<Message, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(message) = self.pending.pop_front() {
                return Some(Ok(message));
            }
            if self.phase == Phase::Done {
                return None;
            }
            if let Err(e) = self.advance() {
                tracing::error!("Read aborted: {e}");
                self.pending.clear();
                self.phase = Phase::Done;
                return Some(Err(e));
            }
        }
    }
}

impl std::iter::FusedIterator for SyncIterator {}

/// Emission time in epoch milliseconds, truncated to whole seconds.
fn emitted_at() -> i64 {
    Utc::now().timestamp() * 1000
}
