use log::info;

/// Stage-scoped wrapper over the `log` facade: every record is prefixed
/// with the extraction stage that emitted it.
pub struct LogManager {
    stage: &'static str,
}

impl LogManager {
    pub fn for_stage(stage: &'static str) -> Self {
        Self { stage }
    }

    pub fn record(&self, message: &str) {
        info!("{}: {}", self.stage, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_carry_the_stage_label() {
        let logger = LogManager::for_stage("boxcar");
        assert_eq!(logger.stage, "boxcar");
        logger.record("width 14.0 peak 9.8");
    }
}
