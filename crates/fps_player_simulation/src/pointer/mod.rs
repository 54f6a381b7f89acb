//! Pointer capture toggle
//!
//! - ui_cancel → курсор виден (release)
//! - re-capture только после удаления projectile (и при ready)

use crate::host::{PlayerHost, PointerMode};

/// Release курсора по ui_cancel
///
/// Возвращает `true`, если режим реально поменялся.
pub fn release_pointer<H: PlayerHost>(host: &mut H) -> bool {
    if host.pointer_mode() == PointerMode::Visible {
        return false;
    }
    host.set_pointer_mode(PointerMode::Visible);
    true
}

/// Захват курсора, если он сейчас не захвачен
pub fn recapture_pointer<H: PlayerHost>(host: &mut H) -> bool {
    if host.pointer_mode() == PointerMode::Captured {
        return false;
    }
    host.set_pointer_mode(PointerMode::Captured);
    true
}
