use reptile_traits::{Surface, SurfaceError};

/// Keeps a surface open for the duration of an export.
///
/// `open` calls `begin_document`; the document is ended exactly once, either
/// by `close` or when the guard is dropped on an early return.
pub struct SurfaceScope<'s> {
    surface: &'s mut dyn Surface,
    closed: bool,
}

impl<'s> SurfaceScope<'s> {
    pub fn open(surface: &'s mut dyn Surface) -> Result<Self, SurfaceError> {
        surface.begin_document()?;
        log::debug!("Opened surface '{}'", surface.name());
        Ok(Self {
            surface,
            closed: false,
        })
    }

    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }

    pub fn close(mut self) -> Result<(), SurfaceError> {
        self.closed = true;
        log::debug!("Closing surface '{}'", self.surface.name());
        self.surface.end_document()
    }
}

impl Drop for SurfaceScope<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(err) = self.surface.end_document() {
            log::warn!(
                "Failed to end document on surface '{}' after an aborted export: {}",
                self.surface.name(),
                err
            );
        }
    }
}
