use crate::backend::{ImageFilterBackend, ImageSize};
use crate::error::BackendError;

/// Named slot of a [`ScratchPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }

    fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

/// Two scratch images used as ping-pong read/write targets.
///
/// The pair mutably borrows the backend for its whole lifetime and hands
/// both images back through [`ImageFilterBackend::release_scratch`] when
/// dropped, whether the composite finished or bailed out with an error.
pub struct ScratchPair<'b, B: ImageFilterBackend> {
    backend: &'b mut B,
    // Always two images until drop.
    slots: Vec<B::Image>,
    front: Slot,
    size: ImageSize,
}

impl<'b, B: ImageFilterBackend> ScratchPair<'b, B> {
    /// Allocate slot A, then slot B. If B fails, A is released before the
    /// error is returned.
    pub fn acquire(backend: &'b mut B, size: ImageSize) -> Result<Self, BackendError> {
        let a = backend.allocate_scratch(size)?;
        let b = match backend.allocate_scratch(size) {
            Ok(b) => b,
            Err(e) => {
                backend.release_scratch(a);
                return Err(e);
            }
        };
        Ok(Self { backend, slots: vec![a, b], front: Slot::A, size })
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Backend the pair borrows, for work between ping-pong passes.
    pub fn backend(&mut self) -> &mut B {
        self.backend
    }

    /// Slot currently holding the readable image.
    pub fn front_slot(&self) -> Slot {
        self.front
    }

    pub fn front(&self) -> &B::Image {
        &self.slots[self.front.index()]
    }

    /// Make A the front slot again.
    pub fn reset(&mut self) {
        self.front = Slot::A;
    }

    pub fn swap(&mut self) {
        self.front = self.front.other();
    }

    /// Backend, front image (read) and back image (write), borrowed together.
    pub fn split(&mut self) -> (&mut B, &B::Image, &mut B::Image) {
        let (lo, hi) = self.slots.split_at_mut(1);
        let (front, back) = match self.front {
            Slot::A => (&lo[0], &mut hi[0]),
            Slot::B => (&hi[0], &mut lo[0]),
        };
        (&mut *self.backend, front, back)
    }

    /// Backend and the front image as a write target.
    pub fn front_mut(&mut self) -> (&mut B, &mut B::Image) {
        let idx = self.front.index();
        (&mut *self.backend, &mut self.slots[idx])
    }
}

impl<B: ImageFilterBackend> Drop for ScratchPair<'_, B> {
    fn drop(&mut self) {
        for image in self.slots.drain(..) {
            self.backend.release_scratch(image);
        }
    }
}
