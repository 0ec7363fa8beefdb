//! Output macros.
//!
//! Each macro takes anything implementing `Display`, usually a
//! [`Message`](super::Message). Passing `true` as the second argument pads
//! the line with blank lines.
//!
//! In debug mode (`PMT_DEBUG` or `RUST_LOG` set) output goes to `tracing`
//! at the matching level instead of stdout/stderr.
//!
//! ```rust,ignore
//! use pmt::{msg_success, msg_warning};
//! use pmt::libs::messages::Message;
//!
//! msg_success!(Message::ConfigSaved);
//! msg_warning!(Message::NoOverdueTasks, true);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("PMT_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __msg_emit {
    ($level:ident, $print:ident, $prefix:expr, $msg:expr, $padded:expr) => {{
        let text = if $padded { format!("\n{}{}\n", $prefix, $msg) } else { format!("{}{}", $prefix, $msg) };
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$level!("{}", text);
        } else {
            $print!("{}", text);
        }
    }};
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "✅ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "✅ ", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::__msg_emit!(error, eprintln, "❌ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(error, eprintln, "❌ ", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        $crate::__msg_emit!(warn, println, "⚠️ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(warn, println, "⚠️ ", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "ℹ️ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "ℹ️ ", $msg, true)
    };
}

/// Printed only in debug mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
