//! Background chunk generation.
//!
//! Worker threads pull requests off a bounded crossbeam channel, run the
//! generator, and send finished chunks back. The main thread polls without
//! blocking and feeds completed chunks into the world.

use std::thread;

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};
use rustc_hash::FxHashSet;

use crate::constants::{LOADER_REQUEST_QUEUE, LOADER_RESULT_QUEUE};
use crate::core::chunk::Chunk;
use crate::world::generator::ChunkGenerator;

#[derive(Clone, Copy, Debug)]
struct ChunkRequest {
    p: i32,
    q: i32,
}

/// Hands chunk generation to a pool of worker threads.
pub struct ChunkLoader {
    request_tx: Sender<ChunkRequest>,
    result_rx: Receiver<Chunk>,
    pending: FxHashSet<(i32, i32)>,
    worker_count: usize,
}

impl ChunkLoader {
    /// One worker per logical CPU.
    pub fn new(generator: ChunkGenerator) -> Self {
        Self::with_worker_count(num_cpus::get(), generator)
    }

    pub fn with_worker_count(workers: usize, generator: ChunkGenerator) -> Self {
        let workers = workers.max(1);
        let (request_tx, request_rx) = bounded::<ChunkRequest>(LOADER_REQUEST_QUEUE);
        let (result_tx, result_rx) = bounded::<Chunk>(LOADER_RESULT_QUEUE);

        for worker_id in 0..workers {
            let rx = request_rx.clone();
            let tx = result_tx.clone();
            let generator = generator.clone();

            thread::Builder::new()
                .name(format!("chunk-gen-{}", worker_id))
                .spawn(move || {
                    while let Ok(request) = rx.recv() {
                        let chunk = generator.generate_chunk(request.p, request.q);
                        if tx.send(chunk).is_err() {
                            // Main thread is gone, exit
                            break;
                        }
                    }
                })
                .expect("Failed to spawn chunk worker");
        }

        tracing::debug!("Spawned {} chunk workers", workers);

        ChunkLoader {
            request_tx,
            result_rx,
            pending: FxHashSet::default(),
            worker_count: workers,
        }
    }

    /// Queues one chunk for generation. Requests already in flight are
    /// coalesced. When the queue is full the request is dropped; the next
    /// streaming pass will ask again.
    pub fn request(&mut self, p: i32, q: i32) {
        if self.pending.contains(&(p, q)) {
            return;
        }
        if self.request_tx.try_send(ChunkRequest { p, q }).is_ok() {
            self.pending.insert((p, q));
        }
    }

    /// Queues a set of coordinates, nearest to `center` first so close
    /// chunks come back before distant ones.
    pub fn request_batch(&mut self, coords: &[(i32, i32)], center: (i32, i32)) {
        let mut sorted: Vec<(i32, i32)> = coords
            .iter()
            .copied()
            .filter(|coord| !self.pending.contains(coord))
            .collect();
        sorted.sort_by_key(|&(p, q)| {
            let dp = p - center.0;
            let dq = q - center.1;
            dp * dp + dq * dq
        });

        for (p, q) in sorted {
            if self.pending.len() >= LOADER_REQUEST_QUEUE {
                break;
            }
            self.request(p, q);
        }
    }

    pub fn is_pending(&self, p: i32, q: i32) -> bool {
        self.pending.contains(&(p, q))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Collects up to `max_results` finished chunks without blocking.
    pub fn poll_results(&mut self, max_results: usize) -> Vec<Chunk> {
        let mut results = Vec::new();
        for _ in 0..max_results {
            match self.result_rx.try_recv() {
                Ok(chunk) => {
                    self.pending.remove(&chunk.coords());
                    results.push(chunk);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        results
    }

    /// Collects every finished chunk currently waiting.
    pub fn poll_all_results(&mut self) -> Vec<Chunk> {
        self.poll_results(LOADER_RESULT_QUEUE)
    }

    /// Forgets a request. Any chunk already being generated still arrives
    /// and is returned by a later poll.
    pub fn cancel(&mut self, p: i32, q: i32) {
        self.pending.remove(&(p, q));
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }
}
