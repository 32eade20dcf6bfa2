//! Generation Service
//!
//! Drives exactly one generation run to completion per report: compose the
//! instructions, stream tokens from the generator, re-parse the growing
//! buffer for live observers, and commit the final text to the store once.
//! Re-entrancy is blocked per short code, and a report that already carries
//! text is returned as-is without touching the generator.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use mirror_core::streaming::{GenerationEvent, GeneratorStreamEvent};
use mirror_core::{classify, compose, sections, Profile, ReportError, ReportStore, StoreError};
use mirror_llm::Generator;

use crate::utils::error::AppResult;
use crate::utils::short_code::mint_short_code;

/// Capacity of the observer event channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// A started (or resumed) generation run.
#[derive(Debug)]
pub struct GenerationHandle {
    /// The short code the run is keyed by (minted if none was supplied).
    pub short_code: String,
    /// Event stream: snapshots while streaming, one terminal event at the end.
    pub events: mpsc::Receiver<GenerationEvent>,
}

/// Releases the in-flight slot for a short code when the run ends, on every
/// exit path including panics.
struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
    short_code: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut set) = self.in_flight.lock() {
            set.remove(&self.short_code);
        }
    }
}

/// Orchestrates generation runs against a store and a generator.
pub struct GenerationService {
    store: Arc<dyn ReportStore>,
    generator: Arc<dyn Generator>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl GenerationService {
    pub fn new(store: Arc<dyn ReportStore>, generator: Arc<dyn Generator>) -> Self {
        Self {
            store,
            generator,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Start (or resume) generation for a profile.
    ///
    /// With `short_code = None` a fresh code is minted and the report is
    /// created before the first token is requested, so the record is
    /// discoverable even if generation fails. A second call for a code that
    /// is still streaming fails with [`ReportError::AlreadyInProgress`]; a
    /// call for a code whose text is already committed resolves immediately
    /// without invoking the generator.
    pub async fn start_generation(
        &self,
        profile: Profile,
        short_code: Option<String>,
    ) -> AppResult<GenerationHandle> {
        profile.validate()?;

        let diagnosis = classify(profile.father_archetype, profile.mother_archetype);
        let bundle = compose(&profile, diagnosis)?;

        let short_code = short_code.unwrap_or_else(mint_short_code);

        let guard = self.try_acquire(&short_code)?;

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        // Resume rule: committed text is never regenerated.
        match self.store.get(&short_code).await {
            Ok(report) if !report.generated_text.is_empty() => {
                info!(short_code = %short_code, "report already complete, resuming");
                let _ = tx
                    .send(GenerationEvent::Completed {
                        short_code: short_code.clone(),
                        sections: report.sections(),
                    })
                    .await;
                return Ok(GenerationHandle { short_code, events: rx });
            }
            Ok(_) => {
                // Pending report exists; a previous run failed before commit.
            }
            Err(StoreError::NotFound(_)) => {
                // Create-before-generate: the record must be discoverable
                // before the first token arrives.
                self.store.create(&short_code, &profile).await?;
            }
            Err(e) => return Err(e.into()),
        }

        info!(short_code = %short_code, "starting generation run");

        let store = Arc::clone(&self.store);
        let generator = Arc::clone(&self.generator);
        let code = short_code.clone();
        let system = bundle.system_instruction;
        let user = bundle.user_instruction;

        // Detached: a gone observer must not cancel the run; the stream is
        // allowed to finish and persist.
        tokio::spawn(async move {
            let _guard = guard;
            run_stream(store, generator, code, system, user, tx).await;
        });

        Ok(GenerationHandle { short_code, events: rx })
    }

    fn try_acquire(&self, short_code: &str) -> Result<InFlightGuard, ReportError> {
        let mut set = self
            .in_flight
            .lock()
            .map_err(|_| ReportError::generator_failed("in-flight registry poisoned"))?;
        if !set.insert(short_code.to_string()) {
            return Err(ReportError::AlreadyInProgress(short_code.to_string()));
        }
        Ok(InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
            short_code: short_code.to_string(),
        })
    }
}

/// Consume the generator stream, emit snapshots, and commit the final text.
async fn run_stream(
    store: Arc<dyn ReportStore>,
    generator: Arc<dyn Generator>,
    short_code: String,
    system: String,
    user: String,
    tx: mpsc::Sender<GenerationEvent>,
) {
    let (inner_tx, mut inner_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

    let driver = {
        let generator = Arc::clone(&generator);
        tokio::spawn(async move { generator.stream_report(&system, &user, inner_tx).await })
    };

    let mut accumulated = String::new();
    while let Some(event) = inner_rx.recv().await {
        match event {
            GeneratorStreamEvent::TextDelta { content } => {
                accumulated.push_str(&content);
                let _ = tx
                    .send(GenerationEvent::Snapshot {
                        sections: sections::parse(&accumulated),
                        chars: accumulated.chars().count(),
                    })
                    .await;
            }
            GeneratorStreamEvent::Error { message, .. } => {
                warn!(short_code = %short_code, error = %message, "stream error event");
            }
            GeneratorStreamEvent::Complete { .. } => {}
        }
    }

    match driver.await {
        Ok(Ok(full_text)) => {
            if full_text.is_empty() {
                error!(short_code = %short_code, "generator produced no text");
                let _ = tx
                    .send(GenerationEvent::Failed {
                        message: "generator produced no text".to_string(),
                    })
                    .await;
                return;
            }

            let final_sections = sections::parse(&full_text);
            match store.update_text(&short_code, &full_text).await {
                Ok(()) => {
                    info!(short_code = %short_code, chars = full_text.chars().count(), "report committed");
                    let _ = tx
                        .send(GenerationEvent::Completed {
                            short_code: short_code.clone(),
                            sections: final_sections,
                        })
                        .await;
                }
                Err(e) => {
                    // The text already reached the observer via snapshots;
                    // the stored report still reads as pending.
                    error!(short_code = %short_code, error = %e, "persist failed after successful stream");
                    let _ = tx
                        .send(GenerationEvent::PersistFailed {
                            short_code: short_code.clone(),
                            message: e.to_string(),
                            sections: final_sections,
                        })
                        .await;
                }
            }
        }
        Ok(Err(e)) => {
            warn!(short_code = %short_code, error = %e, "generation failed");
            let _ = tx
                .send(GenerationEvent::Failed {
                    message: e.to_string(),
                })
                .await;
        }
        Err(e) => {
            error!(short_code = %short_code, error = %e, "generation task panicked");
            let _ = tx
                .send(GenerationEvent::Failed {
                    message: format!("generation task failed: {}", e),
                })
                .await;
        }
    }
}
