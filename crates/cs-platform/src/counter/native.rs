//! Native pasteboard change counter.
//!
//! macOS exposes `NSPasteboard.changeCount`, a counter the system
//! bumps on every clipboard write; comparing it is cheaper than
//! reading content. Other platforms have no portable equivalent, so
//! `try_new()` yields `None` there and the detector runs the
//! content-hash polling strategy instead.

#[cfg(target_os = "macos")]
mod imp {
    use objc::runtime::Object;
    use objc::{class, msg_send, sel, sel_impl};

    use cs_core::errors::DetectionError;
    use cs_core::ports::ChangeCounterPort;

    pub struct NativeChangeCounter;

    impl NativeChangeCounter {
        pub fn try_new() -> Option<Self> {
            Some(Self)
        }
    }

    impl ChangeCounterPort for NativeChangeCounter {
        fn change_count(&self) -> Result<u64, DetectionError> {
            unsafe {
                let pasteboard: *mut Object = msg_send![class!(NSPasteboard), generalPasteboard];
                if pasteboard.is_null() {
                    return Err(DetectionError::CounterUnavailable(
                        "NSPasteboard.generalPasteboard returned nil".to_string(),
                    ));
                }
                let count: i64 = msg_send![pasteboard, changeCount];
                Ok(count as u64)
            }
        }
    }
}

#[cfg(not(target_os = "macos"))]
mod imp {
    use cs_core::errors::DetectionError;
    use cs_core::ports::ChangeCounterPort;

    pub struct NativeChangeCounter;

    impl NativeChangeCounter {
        pub fn try_new() -> Option<Self> {
            None
        }
    }

    impl ChangeCounterPort for NativeChangeCounter {
        fn change_count(&self) -> Result<u64, DetectionError> {
            Err(DetectionError::CounterUnavailable(
                "no native change counter on this platform".to_string(),
            ))
        }
    }
}

pub use imp::NativeChangeCounter;
