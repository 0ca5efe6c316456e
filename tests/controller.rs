mod tests {
    use myrtio_cct_light::{
        AttributeUpdate, CalibrationConfig, DutyOutput, DutyPair, InitError, LightController,
        LightControllerConfig, LightState, OutputChannel, ParamValue, UpdateChannel,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct WriteFailed;

    /// Records every write
    #[derive(Default)]
    struct RecordingOutput {
        writes: Vec<(OutputChannel, u8)>,
        fail_init: bool,
        fail_channel: Option<OutputChannel>,
    }

    impl RecordingOutput {
        fn last_pair(&self) -> DutyPair {
            let mut pair = DutyPair::OFF;
            for (channel, percent) in &self.writes {
                match channel {
                    OutputChannel::Warm => pair.warm = *percent,
                    OutputChannel::Cool => pair.cool = *percent,
                }
            }
            pair
        }
    }

    impl DutyOutput for RecordingOutput {
        type Error = WriteFailed;

        fn init(&mut self) -> Result<(), WriteFailed> {
            if self.fail_init {
                return Err(WriteFailed);
            }
            Ok(())
        }

        fn set_duty(&mut self, channel: OutputChannel, percent: u8) -> Result<(), WriteFailed> {
            if self.fail_channel == Some(channel) {
                return Err(WriteFailed);
            }
            self.writes.push((channel, percent));
            Ok(())
        }
    }

    fn controller() -> LightController<RecordingOutput> {
        let Ok(controller) =
            LightController::new(RecordingOutput::default(), &LightControllerConfig::default())
        else {
            panic!("init failed");
        };
        controller
    }

    #[test]
    fn test_initial_state_is_applied() {
        let controller = controller();
        assert_eq!(controller.state(), LightState::new(true, 10, 50));
        assert_eq!(controller.last_output(), DutyPair::new(5, 5));
        assert_eq!(
            controller.output().writes,
            vec![(OutputChannel::Warm, 5), (OutputChannel::Cool, 5)]
        );
    }

    #[test]
    fn test_init_failure() {
        let output = RecordingOutput {
            fail_init: true,
            ..RecordingOutput::default()
        };
        let result = LightController::new(output, &LightControllerConfig::default());
        assert!(matches!(result, Err(InitError::Output(WriteFailed))));
    }

    #[test]
    fn test_scenario() {
        let mut controller = controller();
        assert_eq!(controller.last_output(), DutyPair::new(5, 5));

        controller.set_cct(0);
        assert_eq!(controller.last_output(), DutyPair::new(10, 0));

        controller.set_power(false);
        assert_eq!(controller.recompute_and_apply(), DutyPair::OFF);

        controller.set_power(true);
        assert_eq!(controller.recompute_and_apply(), DutyPair::new(10, 0));
        assert_eq!(controller.output().last_pair(), DutyPair::new(10, 0));
    }

    #[test]
    fn test_set_power_does_not_write() {
        let mut controller = controller();
        let writes = controller.output().writes.len();
        controller.set_power(false);
        assert_eq!(controller.output().writes.len(), writes);
        assert!(!controller.state().power());
    }

    #[test]
    fn test_both_channels_written_in_order() {
        let mut controller = controller();
        controller.output_mut().writes.clear();

        controller.set_brightness(80);
        assert_eq!(
            controller.output().writes,
            vec![(OutputChannel::Warm, 40), (OutputChannel::Cool, 40)]
        );

        controller.output_mut().writes.clear();
        controller.set_cct(50);
        assert_eq!(
            controller.output().writes,
            vec![(OutputChannel::Warm, 40), (OutputChannel::Cool, 40)]
        );
    }

    #[test]
    fn test_idempotent_brightness() {
        let mut controller = controller();
        controller.set_brightness(50);
        let once = controller.last_output();
        controller.set_brightness(50);
        assert_eq!(controller.last_output(), once);
        assert_eq!(once, DutyPair::new(25, 25));
    }

    #[test]
    fn test_clamping() {
        let mut high = controller();
        let mut max = controller();
        high.set_brightness(150);
        max.set_brightness(100);
        assert_eq!(high.state(), max.state());
        assert_eq!(high.last_output(), max.last_output());

        let mut low = controller();
        let mut min = controller();
        low.set_cct(-5);
        min.set_cct(0);
        assert_eq!(low.state(), min.state());
        assert_eq!(low.last_output(), min.last_output());
        assert_eq!(low.state().cct(), 0);
    }

    #[test]
    fn test_failed_write_does_not_block_other_channel() {
        let output = RecordingOutput {
            fail_channel: Some(OutputChannel::Warm),
            ..RecordingOutput::default()
        };
        let Ok(mut controller) = LightController::new(output, &LightControllerConfig::default())
        else {
            panic!("init failed");
        };
        assert_eq!(controller.write_failures(), 1);
        assert_eq!(controller.output().writes, vec![(OutputChannel::Cool, 5)]);

        controller.set_cct(100);
        assert_eq!(controller.write_failures(), 2);
        assert_eq!(controller.output().last_pair(), DutyPair::new(0, 10));
    }

    #[test]
    fn test_param_writes() {
        let mut controller = controller();
        assert!(controller.handle_param_write("brightness", ParamValue::Int(60)));
        assert!(controller.handle_param_write("cct", ParamValue::Int(100)));
        assert_eq!(controller.last_output(), DutyPair::new(0, 60));

        assert!(controller.handle_param_write("power", ParamValue::Bool(false)));
        assert_eq!(controller.last_output(), DutyPair::OFF);
        assert_eq!(controller.state().brightness(), 60);
    }

    #[test]
    fn test_unknown_attribute_is_ignored() {
        let mut controller = controller();
        let state = controller.state();
        let writes = controller.output().writes.len();

        assert!(!controller.handle_param_write("hue", ParamValue::Int(120)));
        assert!(!controller.handle_param_write("brightness", ParamValue::Bool(true)));

        assert_eq!(controller.state(), state);
        assert_eq!(controller.output().writes.len(), writes);
    }

    #[test]
    fn test_batch_writes_once() {
        let mut controller = controller();
        controller.output_mut().writes.clear();

        let applied = controller.apply_batch([
            AttributeUpdate::Power(true),
            AttributeUpdate::Brightness(40),
            AttributeUpdate::Cct(25),
        ]);
        assert_eq!(applied, 3);
        assert_eq!(
            controller.output().writes,
            vec![(OutputChannel::Warm, 30), (OutputChannel::Cool, 10)]
        );

        controller.output_mut().writes.clear();
        assert_eq!(controller.apply_batch([] as [AttributeUpdate; 0]), 0);
        assert!(controller.output().writes.is_empty());
    }

    #[test]
    fn test_batch_matches_sequential_updates() {
        let updates = [
            AttributeUpdate::Cct(70),
            AttributeUpdate::Brightness(120),
            AttributeUpdate::Power(false),
            AttributeUpdate::Power(true),
        ];

        let mut batched = controller();
        batched.apply_batch(updates);

        let mut sequential = controller();
        for update in updates {
            sequential.apply(update);
        }

        assert_eq!(batched.state(), sequential.state());
        assert_eq!(batched.last_output(), sequential.last_output());
        assert_eq!(batched.last_output(), DutyPair::new(30, 70));
    }

    #[test]
    fn test_process_pending() {
        let channel = UpdateChannel::<4>::new();
        let sender = channel.sender();
        let mut controller = controller();
        controller.output_mut().writes.clear();

        assert_eq!(sender.forward("cct", ParamValue::Int(0)), Ok(true));
        assert_eq!(sender.forward("scene", ParamValue::Int(3)), Ok(false));
        assert_eq!(sender.forward("brightness", ParamValue::Int(30)), Ok(true));

        assert_eq!(controller.process_pending(&channel.receiver()), 2);
        assert!(channel.is_empty());
        assert_eq!(
            controller.output().writes,
            vec![(OutputChannel::Warm, 30), (OutputChannel::Cool, 0)]
        );

        assert_eq!(controller.process_pending(&channel.receiver()), 0);
    }

    #[test]
    fn test_calibrated_output() {
        let config = LightControllerConfig {
            initial: LightState::new(true, 100, 50),
            calibration: CalibrationConfig::MEASURED,
        };
        let Ok(mut controller) = LightController::new(RecordingOutput::default(), &config) else {
            panic!("init failed");
        };
        assert_eq!(controller.last_output(), DutyPair::new(48, 40));

        controller.set_cct(0);
        assert_eq!(controller.last_output(), DutyPair::new(100, 0));
    }
}
