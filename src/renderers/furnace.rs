// Copyright @yucwang 2021

use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

/// Monte Carlo estimate of the radiance along a single view ray. Paths are
/// split into fixed-size batches that workers claim from a shared counter.
/// Every batch owns the random stream derived from its index, so the result
/// does not depend on the thread count.
pub struct FurnaceRenderer {
    integrator: Box<dyn Integrator>,
    seed: u64,
    threads: usize,
    batch_size: usize,
    show_progress: bool,
}

impl FurnaceRenderer {
    pub fn new(integrator: Box<dyn Integrator>, seed: u64) -> Self {
        Self { integrator, seed, threads: 0, batch_size: 1024, show_progress: true }
    }

    /// Zero picks the available parallelism.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn thread_count(&self) -> usize {
        match self.threads {
            0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            n => n,
        }
    }

    pub fn estimate(&self, scene: &Scene, ray: &Ray3f, paths: usize) -> RGBSpectrum {
        if paths == 0 {
            return RGBSpectrum::default();
        }

        let batch_size = self.batch_size;
        let total_batches = (paths + batch_size - 1) / batch_size;
        let integrator_ref: &dyn Integrator = self.integrator.as_ref();

        let progress = if self.show_progress {
            ProgressBar::new(total_batches as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} batches")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_batch = Arc::new(AtomicUsize::new(0));
        let thread_count = self.thread_count().min(total_batches);
        let (tx, rx) = mpsc::channel::<(usize, RGBSpectrum)>();
        let mut sums = vec![RGBSpectrum::default(); total_batches];

        log::info!("estimating {} paths in {} batches on {} threads", paths, total_batches, thread_count);

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_batch = Arc::clone(&next_batch);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let batch_index = next_batch.fetch_add(1, Ordering::Relaxed);
                        if batch_index >= total_batches {
                            break;
                        }

                        let start = batch_index * batch_size;
                        let end = (start + batch_size).min(paths);
                        let mut rng = LcgRng::for_stream(self.seed, batch_index as u64);
                        let mut sum = RGBSpectrum::default();
                        for _ in start..end {
                            sum += integrator_ref.trace_ray(scene, ray, &mut rng);
                        }
                        if tx.send((batch_index, sum)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for _ in 0..total_batches {
                if let Ok((batch_index, sum)) = rx.recv() {
                    sums[batch_index] = sum;
                    progress.inc(1);
                }
            }
        });
        progress.finish_and_clear();

        // Summed in batch order so the float result is reproducible.
        let mut total = RGBSpectrum::default();
        for sum in &sums {
            total += *sum;
        }
        total / paths as Float
    }
}
