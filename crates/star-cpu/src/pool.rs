use star_core::ImageSize;

use crate::surface::CpuImage;

/// Running counters of scratch traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScratchStats {
    /// Scratch images created from scratch.
    pub allocated: u64,
    /// Scratch requests served from the free list.
    pub reused: u64,
    pub released: u64,
}

impl ScratchStats {
    pub fn acquired(&self) -> u64 {
        self.allocated + self.reused
    }

    /// Scratch images handed out and not yet released.
    pub fn outstanding(&self) -> u64 {
        self.acquired().saturating_sub(self.released)
    }
}

/// Free list of released scratch images, matched by exact size.
#[derive(Debug)]
pub struct ScratchPool {
    free: Vec<CpuImage>,
    capacity: usize,
    stats: ScratchStats,
}

impl ScratchPool {
    pub fn new(capacity: usize) -> Self {
        Self { free: Vec::new(), capacity, stats: ScratchStats::default() }
    }

    pub fn take(&mut self, size: ImageSize) -> CpuImage {
        if let Some(idx) = self.free.iter().position(|img| img.size() == size) {
            let mut img = self.free.swap_remove(idx);
            img.clear();
            self.stats.reused += 1;
            log::trace!("Reusing {}x{} scratch image", size.width, size.height);
            return img;
        }
        self.stats.allocated += 1;
        CpuImage::new(size)
    }

    pub fn give(&mut self, image: CpuImage) {
        self.stats.released += 1;
        if self.free.len() < self.capacity {
            self.free.push(image);
        }
    }

    pub fn stats(&self) -> ScratchStats {
        self.stats
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Drop every pooled image.
    pub fn trim(&mut self) {
        self.free.clear();
    }
}
