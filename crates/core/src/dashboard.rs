//! Citizen dashboard sizing.

/// Recent applications and recent notifications shown on the dashboard.
pub const RECENT_LIMIT: i64 = 5;

/// Default page size for the notification list.
pub const DEFAULT_NOTIFICATION_LIMIT: i64 = 50;

/// Upper bound for any caller-supplied list limit.
pub const MAX_NOTIFICATION_LIMIT: i64 = 100;

/// Clamp a caller-supplied limit into `1..=MAX_NOTIFICATION_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_NOTIFICATION_LIMIT)
        .clamp(1, MAX_NOTIFICATION_LIMIT)
}

pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_caps() {
        assert_eq!(clamp_limit(None), 50);
        assert_eq!(clamp_limit(Some(500)), 100);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_offset(Some(-3)), 0);
    }
}
