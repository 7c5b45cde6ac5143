//! Worker threads that generate requested chunks off the caller's thread.
//!
//! Each worker owns one `GenCtx` and blocks on the job channel. The parallel
//! parts of a chunk run inside a separate rayon pool through `install`, so a
//! blocked worker loop is never a rayon job another thread could steal.
#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use hashbrown::HashMap;
use rayon::{ThreadPool, ThreadPoolBuilder};
use strata_chunk::{ChunkGenerateResult, GenerateError, generate_chunk_with_ctx};
use strata_world::{ChunkCoord, GenCtx, World};

#[derive(Clone, Copy, Debug)]
struct GenJob {
    coord: ChunkCoord,
    job_id: u64,
}

#[derive(Debug)]
pub struct JobOut {
    pub coord: ChunkCoord,
    pub job_id: u64,
    pub result: Result<ChunkGenerateResult, GenerateError>,
    pub t_total_ms: u32,
}

fn process_job(job: GenJob, ctx: &mut GenCtx, compute: &ThreadPool, tx: &Sender<JobOut>) {
    let GenJob { coord, job_id } = job;
    let t_job_start = Instant::now();
    let result = compute.install(|| generate_chunk_with_ctx(ctx, coord));
    let t_total_ms = t_job_start.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    let _ = tx.send(JobOut {
        coord,
        job_id,
        result,
        t_total_ms,
    });
}

fn worker_loop(world: &World, compute: &ThreadPool, rx: &Receiver<GenJob>, tx: &Sender<JobOut>) {
    let mut ctx = world.make_gen_ctx();
    while let Ok(job) = rx.recv() {
        process_job(job, &mut ctx, compute, tx);
    }
}

pub struct Runtime {
    job_tx: Option<Sender<GenJob>>,
    res_rx: Receiver<JobOut>,
    handles: Vec<JoinHandle<()>>,
    inflight: Mutex<HashMap<ChunkCoord, u64>>,
    next_job_id: AtomicU64,
    pub workers: usize,
}

impl Runtime {
    /// Spawns `workers` generation threads; 0 uses the available parallelism.
    pub fn new(world: Arc<World>, workers: usize) -> Self {
        let (job_tx, job_rx) = unbounded::<GenJob>();
        let (res_tx, res_rx) = unbounded::<JobOut>();
        let workers = if workers == 0 {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(8)
        } else {
            workers
        };

        let compute = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("strata-compute-{i}"))
                .build()
                .expect("generation compute pool"),
        );
        let handles = (0..workers)
            .map(|i| {
                let rx = job_rx.clone();
                let tx = res_tx.clone();
                let world = world.clone();
                let compute = compute.clone();
                thread::Builder::new()
                    .name(format!("strata-gen-{i}"))
                    .spawn(move || worker_loop(&world, &compute, &rx, &tx))
                    .expect("spawn generation worker")
            })
            .collect();
        log::info!("generation runtime started with {workers} workers");

        Self {
            job_tx: Some(job_tx),
            res_rx,
            handles,
            inflight: Mutex::new(HashMap::new()),
            next_job_id: AtomicU64::new(1),
            workers,
        }
    }

    fn inflight(&self) -> MutexGuard<'_, HashMap<ChunkCoord, u64>> {
        self.inflight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queues `coord` for generation and returns its job id. A coord that is
    /// already queued or running (and whose result has not been received yet)
    /// is not queued again; its existing job id is returned.
    pub fn submit(&self, coord: ChunkCoord) -> u64 {
        let mut inflight = self.inflight();
        if let Some(&job_id) = inflight.get(&coord) {
            log::debug!("chunk {coord} already in flight as job {job_id}");
            return job_id;
        }
        let job_id = self.next_job_id.fetch_add(1, Ordering::Relaxed);
        let sent = self
            .job_tx
            .as_ref()
            .is_some_and(|tx| tx.send(GenJob { coord, job_id }).is_ok());
        if !sent {
            log::warn!("generation workers are gone; dropping chunk {coord}");
            return job_id;
        }
        inflight.insert(coord, job_id);
        job_id
    }

    fn complete(&self, out: &JobOut) {
        let mut inflight = self.inflight();
        if inflight.get(&out.coord) == Some(&out.job_id) {
            inflight.remove(&out.coord);
        }
    }

    pub fn try_recv(&self) -> Option<JobOut> {
        let out = self.res_rx.try_recv().ok()?;
        self.complete(&out);
        Some(out)
    }

    /// Waits for the next finished job. Returns `None` when nothing is pending.
    pub fn recv_blocking(&self) -> Option<JobOut> {
        if self.pending() == 0 {
            return None;
        }
        let out = self.res_rx.recv().ok()?;
        self.complete(&out);
        Some(out)
    }

    /// Jobs submitted whose results have not been received.
    pub fn pending(&self) -> usize {
        self.inflight().len()
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        // closing the job channel ends every worker loop once the queue drains
        self.job_tx.take();
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                log::error!("generation worker panicked");
            }
        }
    }
}
