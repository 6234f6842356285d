#[cfg(test)]
mod tests {
    use crate::commands::ControlCommand;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::DisplayEvent;
    use crate::types::{Color, GeoPoint, Viewport};

    /// Verify all enums round-trip through serde_json.
    #[test]
    fn test_side_serde() {
        for v in [Side::Blue, Side::Red] {
            let json = serde_json::to_string(&v).unwrap();
            let back: Side = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_crt_preset_serde() {
        for v in CrtPreset::ALL {
            let json = serde_json::to_string(&v).unwrap();
            let back: CrtPreset = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_control_command_serde() {
        let commands = vec![
            ControlCommand::Quit,
            ControlCommand::IntensityUp,
            ControlCommand::IntensityDown,
            ControlCommand::IntensityReset,
            ControlCommand::Burst,
            ControlCommand::ToggleFullscreen,
            ControlCommand::CycleCrtPreset,
        ];
        for cmd in commands {
            let json = serde_json::to_string(&cmd).unwrap();
            let back: ControlCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(cmd, back);
        }
    }

    #[test]
    fn test_command_json_is_tagged() {
        let json = serde_json::to_string(&ControlCommand::Burst).unwrap();
        assert_eq!(json, r#"{"type":"Burst"}"#);
    }

    #[test]
    fn test_display_event_serde() {
        let events = vec![
            DisplayEvent::Launched {
                kind: ProjectileKind::Submarine,
                side: Side::Red,
                origin: GeoPoint::new(70.0, 40.0),
                target: GeoPoint::new(38.9, -77.0),
                t0: 3.25,
            },
            DisplayEvent::Impact {
                kind: ProjectileKind::Land,
                target: GeoPoint::new(55.75, 37.62),
            },
            DisplayEvent::Burst {
                land: BURST_LAND_COUNT,
                submarine: BURST_SUB_COUNT,
            },
            DisplayEvent::IntensityChanged {
                land_interval: 1.75,
                submarine_interval: 2.8,
            },
            DisplayEvent::CrtPresetChanged {
                preset: CrtPreset::Full,
            },
            DisplayEvent::Resized {
                width: 1920,
                height: 1080,
            },
        ];
        for ev in events {
            let json = serde_json::to_string(&ev).unwrap();
            let back: DisplayEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(ev, back);
        }
    }

    #[test]
    fn test_crt_preset_cycle() {
        let mut p = CrtPreset::Off;
        let mut seen = Vec::new();
        for _ in 0..3 {
            p = p.next();
            seen.push(p);
        }
        assert_eq!(seen, vec![CrtPreset::Light, CrtPreset::Full, CrtPreset::Off]);
        assert_eq!(CrtPreset::default(), CrtPreset::Light);
    }

    #[test]
    fn test_crt_preset_from_index() {
        for p in CrtPreset::ALL {
            assert_eq!(CrtPreset::try_from(p.index()), Ok(p));
        }
        assert_eq!(
            CrtPreset::try_from(3),
            Err(ConfigError::InvalidCrtPreset(3))
        );
    }

    #[test]
    fn test_viewport_rejects_zero() {
        assert!(Viewport::new(0, 720).is_err());
        assert!(Viewport::new(1280, 0).is_err());
        let vp = Viewport::new(1280, 720).unwrap();
        assert_eq!(vp.area(), 1280 * 720);
        assert_eq!(Viewport::default(), vp);
    }

    #[test]
    fn test_viewport_rejects_oversized() {
        assert!(Viewport::new(8192, 8192).is_ok());
        assert_eq!(
            Viewport::new(8193, 720),
            Err(ConfigError::InvalidViewport {
                width: 8193,
                height: 720
            })
        );
        assert!(Viewport::new(1280, u32::MAX).is_err());
    }

    #[test]
    fn test_color_packing() {
        let c = Color::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0x0012_3456);
        assert_eq!(Color::from_u32(0xFF12_3456), c);
        assert_eq!(CYAN.scaled(0.5), Color::new(0, 127, 127));
        assert_eq!(CYAN.scaled(2.0), CYAN);
    }

    #[test]
    fn test_sites_valid_and_distinct() {
        let land: Vec<_> = land_sites().collect();
        assert_eq!(land.len(), WESTERN_TARGETS.len() + EASTERN_TARGETS.len());
        for site in land_sites().chain(SUBMARINE_POINTS.iter()) {
            assert!(site.point.is_valid(), "{} out of range", site.name);
        }
        for (i, a) in land.iter().enumerate() {
            for b in &land[i + 1..] {
                assert_ne!(a.point, b.point, "{} duplicates {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn test_interval_bounds_bracket_defaults() {
        for d in [DEFAULT_LAUNCH_INTERVAL, DEFAULT_SUB_LAUNCH_INTERVAL] {
            assert!(d > MIN_LAUNCH_INTERVAL && d < MAX_LAUNCH_INTERVAL);
        }
    }

    #[test]
    fn test_command_routing() {
        assert!(ControlCommand::Quit.is_presentation());
        assert!(ControlCommand::ToggleFullscreen.is_presentation());
        assert!(!ControlCommand::Burst.is_presentation());
        assert!(!ControlCommand::CycleCrtPreset.is_presentation());
    }
}
