use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use log::{debug, trace, warn};

use crate::common::DEFAULT_ACCENT_COLOR;

/// Number of images sampled concurrently
pub const DEFAULT_WORKERS: usize = 4;

pub enum WorkItem {
    /// Sample the image at `url`, replying with `(index, color)`
    Sample {
        index: usize,
        url: String,
        reply: mpsc::Sender<(usize, String)>,
    },
    Shutdown,
}

/// Turns an image URL into a color, never failing
pub type Sampler = fn(&str) -> String;

struct Worker {
    recv: Arc<Mutex<mpsc::Receiver<WorkItem>>>,
    sampler: Sampler,
    num: usize,
}

impl Worker {
    fn run(&self) {
        loop {
            let m = match self.recv.lock() {
                Ok(r) => r.recv(),
                Err(_) => return,
            };
            match m {
                Ok(WorkItem::Shutdown) | Err(_) => {
                    trace!("Shutting down worker {}", self.num);
                    return;
                }
                Ok(WorkItem::Sample { index, url, reply }) => {
                    trace!("Worker {}: sampling {:?}", self.num, &url);
                    let sampler = self.sampler;
                    let color = catch_unwind(AssertUnwindSafe(|| sampler(&url)))
                        .unwrap_or_else(|_| {
                            warn!("Sampling {:?} panicked, using default color", &url);
                            DEFAULT_ACCENT_COLOR.into()
                        });
                    // Receiver gone means the batch was abandoned
                    let _ = reply.send((index, color));
                }
            }
        }
    }
}

/// Fixed pool of threads sampling thumbnail colors
pub struct WorkerPool {
    pool: threadpool::ThreadPool,
    num_workers: usize,
    sender: mpsc::Sender<WorkItem>,
}

impl WorkerPool {
    pub fn start(num_workers: usize) -> Self {
        WorkerPool::start_with(num_workers, crate::color::dominant_color)
    }

    pub fn start_with(num_workers: usize, sampler: Sampler) -> Self {
        let num_workers = num_workers.max(1);
        let pool = threadpool::ThreadPool::new(num_workers);
        let (sender, recv) = mpsc::channel();
        let recv = Arc::new(Mutex::new(recv));

        for curnum in 0..num_workers {
            let w = Worker {
                recv: recv.clone(),
                sampler,
                num: curnum,
            };
            pool.execute(move || w.run());
        }

        Self {
            pool,
            num_workers,
            sender,
        }
    }

    pub fn enqueue(&self, item: WorkItem) -> Result<()> {
        self.sender
            .send(item)
            .map_err(|_| anyhow::anyhow!("Worker pool has shut down"))
    }

    /// Samples every URL and waits for all of them. Colors are returned in
    /// the same order as `urls`; any job that never replies gets the default.
    pub fn sample_all(&self, urls: &[String]) -> Vec<String> {
        let (reply, results) = mpsc::channel();
        for (index, url) in urls.iter().enumerate() {
            let queued = self.enqueue(WorkItem::Sample {
                index,
                url: url.clone(),
                reply: reply.clone(),
            });
            if let Err(e) = queued {
                warn!("Not sampling {:?} - {}", url, e);
            }
        }
        drop(reply);

        let mut colors: Vec<Option<String>> = vec![None; urls.len()];
        for _ in 0..urls.len() {
            match results.recv() {
                Ok((index, color)) => colors[index] = Some(color),
                Err(_) => {
                    warn!("Color sampling workers stopped early");
                    break;
                }
            }
        }
        debug!("Sampled {} thumbnail colors", urls.len());

        colors
            .into_iter()
            .map(|c| c.unwrap_or_else(|| DEFAULT_ACCENT_COLOR.into()))
            .collect()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        debug!("Dropping WorkerPool, starting shutdown");
        for _ in 0..self.num_workers {
            let _ = self.sender.send(WorkItem::Shutdown);
        }
        self.pool.join();
    }
}
