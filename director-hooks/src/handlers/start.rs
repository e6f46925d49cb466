use tracing::{debug, info, warn};

use crate::context::{HookArgs, HookContext};
use crate::error::{HookError, Result};
use crate::fabric;

/// Posts the license, retrying while the director comes up.
pub fn start(ctx: &HookContext<'_>, _args: &HookArgs) -> Result<()> {
    if fabric::license_key(ctx).is_none() {
        debug!("no license key configured");
        return Ok(());
    }

    let outcome = ctx.license_retry.run(ctx.sleeper, |attempt| {
        debug!(attempt, "posting license");
        fabric::post_license(ctx)
    })?;

    if outcome.succeeded() {
        info!(attempts = outcome.attempts(), "license posted");
        Ok(())
    } else {
        warn!(attempts = outcome.attempts(), "license was never accepted");
        Err(HookError::LicenseNotYetAccepted {
            attempts: outcome.attempts(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use director_config::{ConfigDelta, ConfigSnapshot};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::FakeSystem;

    fn licensed() -> ConfigDelta {
        ConfigDelta::first_run(
            ConfigSnapshot::new()
                .with("plumgrid-license-key", "KEY-1")
                .with("plumgrid-virtual-ip", "10.0.0.100"),
        )
    }

    #[test]
    fn test_no_key_no_action() {
        let sys = FakeSystem::new();
        let delta = ConfigDelta::first_run(ConfigSnapshot::new());
        start(&sys.context(&delta), &HookArgs::new("start")).unwrap();
        assert!(sys.calls().is_empty());
        assert!(sys.slept().is_empty());
    }

    #[test]
    fn test_first_attempt_succeeds() {
        let sys = FakeSystem::new();
        sys.license_results(&[true]);
        let delta = licensed();
        start(&sys.context(&delta), &HookArgs::new("start")).unwrap();
        assert_eq!(sys.calls(), vec!["post-license 10.0.0.100"]);
        assert!(sys.slept().is_empty());
    }

    #[test]
    fn test_success_on_tenth_attempt_stops_retrying() {
        let sys = FakeSystem::new();
        let mut results = vec![false; 9];
        results.push(true);
        results.push(true);
        sys.license_results(&results);
        let delta = licensed();

        start(&sys.context(&delta), &HookArgs::new("start")).unwrap();
        assert_eq!(sys.calls().len(), 10);
        assert_eq!(sys.slept(), vec![Duration::from_secs(15); 9]);
    }

    #[test]
    fn test_exhausted_retries_surface() {
        let sys = FakeSystem::new();
        let delta = licensed();
        let err = start(&sys.context(&delta), &HookArgs::new("start")).unwrap_err();
        assert!(matches!(err, HookError::LicenseNotYetAccepted { attempts: 10 }));
        assert_eq!(sys.calls().len(), 10);
        assert_eq!(sys.slept().len(), 9);
    }
}
