// SPDX-License-Identifier: GPL-3.0-only

//! Screen saver inhibition over D-Bus
//!
//! Keeps the display awake while the camera is streaming, using the
//! freedesktop ScreenSaver interface on the session bus. Screen savers drop
//! an inhibition once the requesting bus name disconnects, so one session
//! connection is opened lazily and kept for the life of the process. Both
//! calls are best effort: failures are returned for logging and never
//! retried.

use tokio::sync::OnceCell;
use tracing::{info, warn};

const SCREENSAVER_DEST: &str = "org.freedesktop.ScreenSaver";
const SCREENSAVER_PATH: &str = "/org/freedesktop/ScreenSaver";
const SCREENSAVER_IFACE: &str = "org.freedesktop.ScreenSaver";

static SESSION_BUS: OnceCell<zbus::Connection> = OnceCell::const_new();

/// Shared session bus connection, opened on first use
async fn session_connection() -> Result<&'static zbus::Connection, String> {
    SESSION_BUS
        .get_or_try_init(|| async {
            let connection = zbus::Connection::session().await?;
            info!(name = ?connection.unique_name(), "Connected to session D-Bus");
            Ok::<_, zbus::Error>(connection)
        })
        .await
        .map_err(|e| format!("Failed to connect to session D-Bus: {}", e))
}

async fn screensaver_proxy() -> Result<zbus::Proxy<'static>, String> {
    let connection = session_connection().await?;

    zbus::Proxy::new(
        connection,
        SCREENSAVER_DEST,
        SCREENSAVER_PATH,
        SCREENSAVER_IFACE,
    )
    .await
    .map_err(|e| format!("Failed to create ScreenSaver proxy: {}", e))
}

/// Ask the desktop not to blank the screen
///
/// Returns the cookie needed to release the inhibition. The inhibition
/// lasts until [`uninhibit`] or process exit.
pub async fn inhibit(app_name: String, reason: String) -> Result<u32, String> {
    let proxy = screensaver_proxy().await?;

    let cookie: u32 = proxy
        .call("Inhibit", &(app_name.as_str(), reason.as_str()))
        .await
        .map_err(|e| {
            warn!(error = %e, "ScreenSaver inhibit failed");
            format!("Failed to inhibit screen saver: {}", e)
        })?;

    info!(cookie, "Screen saver inhibited");
    Ok(cookie)
}

/// Release an inhibition obtained from [`inhibit`]
pub async fn uninhibit(cookie: u32) -> Result<(), String> {
    let proxy = screensaver_proxy().await?;

    proxy
        .call::<_, _, ()>("UnInhibit", &(cookie,))
        .await
        .map_err(|e| format!("Failed to release screen saver inhibit: {}", e))?;

    info!(cookie, "Screen saver inhibit released");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_connection_is_reused() {
        // Nothing to check without a session bus
        let Ok(first) = session_connection().await else {
            return;
        };
        let second = session_connection().await.unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.unique_name(), second.unique_name());
    }
}
