#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use horde_core::components::{Experience, WeaponStats};
    use horde_core::constants::MIN_WEAPON_INTERVAL_MS;
    use horde_core::defs::WeaponDefinition;
    use horde_core::enums::{SpawnBehavior, UpgradeAttribute, UpgradeRarity};
    use horde_core::upgrades::UpgradeChoice;

    use crate::apply::apply_attribute;
    use crate::rarity::{rarity_for_roll, rarity_weight, roll_rarity};
    use crate::rolling::{attribute_applies, roll_upgrades, OwnedWeapon, RollContext};
    use crate::values::{attribute_label, choice_label, one_significant_digit, value_range};
    use crate::xp::{grant_xp, level_for_xp, xp_percent_to_next_level, xp_threshold};

    fn weapon(name: &str, behavior: SpawnBehavior, lifetime: Option<f64>) -> WeaponDefinition {
        WeaponDefinition {
            name: name.to_string(),
            display_name: name.to_string(),
            description: String::new(),
            base_speed: 0.5,
            base_damage: 2.0,
            base_scale: None,
            base_spawn_interval_ms: 1000.0,
            base_amount: None,
            base_lifetime: lifetime,
            spawn_behavior: behavior,
            target_behavior: None,
            spread: None,
            amount_adds_spread: false,
            child: None,
            width: 16.0,
            height: 16.0,
            sprite: None,
        }
    }

    fn catalog() -> Vec<WeaponDefinition> {
        vec![
            weapon("snowball", SpawnBehavior::TargetNearestEnemy, None),
            weapon("candy_cane", SpawnBehavior::Orbit, Some(3000.0)),
            weapon("aura", SpawnBehavior::OwnerLocation, None),
            weapon("icicle", SpawnBehavior::OwnerFacing, None),
            weapon("ornament", SpawnBehavior::OwnerFacing, Some(1000.0)),
        ]
    }

    fn owned_from<'a>(defs: &'a [WeaponDefinition], names: &[&str]) -> Vec<OwnedWeapon<'a>> {
        names
            .iter()
            .filter_map(|n| defs.iter().find(|d| d.name == *n))
            .map(|d| OwnedWeapon {
                name: &d.name,
                has_lifetime: d.base_lifetime.is_some(),
                behavior: d.spawn_behavior,
            })
            .collect()
    }

    // ---- XP curve ----

    #[test]
    fn test_xp_thresholds() {
        assert_eq!(xp_threshold(1), 0);
        assert_eq!(xp_threshold(2), 6);
        assert_eq!(xp_threshold(3), 14);
        assert_eq!(xp_threshold(4), 24);
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(5), 1);
        assert_eq!(level_for_xp(6), 2);
        assert_eq!(level_for_xp(23), 3);
    }

    #[test]
    fn test_grant_xp_reports_each_level_in_order() {
        let mut exp = Experience::default();
        assert!(grant_xp(&mut exp, 5).is_empty());
        let crossed = grant_xp(&mut exp, 20);
        assert_eq!(crossed, vec![2, 3, 4]);
        assert_eq!(exp.level, 4);
        assert_eq!(exp.xp, 25);
    }

    #[test]
    fn test_xp_curve_at_u32_limit() {
        assert_eq!(xp_threshold(65_534), 4_294_901_754);
        assert_eq!(xp_threshold(65_535), u32::MAX);
        assert_eq!(level_for_xp(u32::MAX), 65_534);

        let mut exp = Experience::default();
        grant_xp(&mut exp, u32::MAX);
        assert!(grant_xp(&mut exp, 10).is_empty());
        assert_eq!(exp.xp, u32::MAX);
        assert_eq!(exp.level, 65_534);
    }

    #[test]
    fn test_xp_percent() {
        let mut exp = Experience::default();
        assert_eq!(xp_percent_to_next_level(&exp), 0.0);
        grant_xp(&mut exp, 3);
        assert!((xp_percent_to_next_level(&exp) - 0.5).abs() < 1e-6);
        grant_xp(&mut exp, 3);
        assert_eq!(exp.level, 2);
        assert_eq!(xp_percent_to_next_level(&exp), 0.0);
    }

    // ---- Rarity ----

    #[test]
    fn test_rarity_weights_sum_to_one() {
        let sum: f64 = UpgradeRarity::ALL.iter().map(|r| rarity_weight(*r)).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rarity_for_roll_boundaries() {
        assert_eq!(rarity_for_roll(0.0), UpgradeRarity::Common);
        assert_eq!(rarity_for_roll(0.49), UpgradeRarity::Common);
        assert_eq!(rarity_for_roll(0.6), UpgradeRarity::Uncommon);
        assert_eq!(rarity_for_roll(0.9), UpgradeRarity::Rare);
        assert_eq!(rarity_for_roll(0.97), UpgradeRarity::Epic);
        assert_eq!(rarity_for_roll(0.995), UpgradeRarity::Legendary);
    }

    #[test]
    fn test_rarity_frequencies_converge() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let trials = 100_000;
        let mut counts = [0u32; 5];
        for _ in 0..trials {
            let r = roll_rarity(&mut rng);
            counts[r as usize] += 1;
        }
        for (i, rarity) in UpgradeRarity::ALL.iter().enumerate() {
            let freq = counts[i] as f64 / trials as f64;
            assert!(
                (freq - rarity_weight(*rarity)).abs() < 0.01,
                "{rarity:?} frequency {freq}"
            );
        }
    }

    // ---- Value tables ----

    #[test]
    fn test_value_ranges_grow_with_rarity() {
        for attribute in UpgradeAttribute::ALL {
            let mut prev = 0.0f32;
            for rarity in UpgradeRarity::ALL {
                let range = value_range(attribute, rarity);
                let magnitude = range.min.abs().max(range.max.abs());
                assert!(magnitude >= prev, "{attribute:?} {rarity:?}");
                prev = magnitude;
            }
        }
    }

    #[test]
    fn test_interval_upgrades_are_negative() {
        for rarity in UpgradeRarity::ALL {
            let range = value_range(UpgradeAttribute::Interval, rarity);
            assert!(range.min < 0.0 && range.max < 0.0);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(attribute_label(UpgradeAttribute::Damage, 0.12), "12% Damage");
        assert_eq!(attribute_label(UpgradeAttribute::Interval, -0.1), "-0.1s Interval");
        assert_eq!(attribute_label(UpgradeAttribute::Amount, 1.4), "1 Amount");
        assert_eq!(one_significant_digit(0.07), "0.07");
        assert_eq!(one_significant_digit(0.0), "0");

        let new_weapon = UpgradeChoice::NewWeapon {
            weapon: "icicle".into(),
        };
        assert_eq!(choice_label(&new_weapon), "");
    }

    // ---- Rolling ----

    #[test]
    fn test_attribute_applies() {
        let defs = catalog();
        let owned = owned_from(&defs, &["snowball", "aura", "ornament"]);
        assert!(!attribute_applies(UpgradeAttribute::Lifetime, &owned[0]));
        assert!(attribute_applies(UpgradeAttribute::Speed, &owned[0]));
        assert!(!attribute_applies(UpgradeAttribute::Speed, &owned[1]));
        assert!(attribute_applies(UpgradeAttribute::Lifetime, &owned[2]));
    }

    #[test]
    fn test_roll_never_offers_invalid_attributes() {
        let defs = catalog();
        let owned = owned_from(&defs, &["snowball", "aura"]);
        let ctx = RollContext {
            catalog: &defs,
            owned: &owned,
            max_weapons: 2,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let offer = roll_upgrades(&ctx, &mut rng, 3);
            assert!(!offer.is_empty());
            assert!(offer.len() <= 3);
            for choice in &offer.choices {
                match choice {
                    UpgradeChoice::NewWeapon { .. } => panic!("weapon slots are full"),
                    UpgradeChoice::Attribute {
                        weapon, attribute, ..
                    } => {
                        assert_ne!(*attribute, UpgradeAttribute::Lifetime);
                        if weapon == "aura" {
                            assert_ne!(*attribute, UpgradeAttribute::Speed);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_roll_offers_each_new_weapon_at_most_once() {
        let defs = catalog();
        let owned = owned_from(&defs, &["snowball"]);
        let ctx = RollContext {
            catalog: &defs,
            owned: &owned,
            max_weapons: 3,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut saw_new_weapon = false;
        for _ in 0..200 {
            let offer = roll_upgrades(&ctx, &mut rng, 3);
            let mut names: Vec<&str> = offer
                .choices
                .iter()
                .filter(|c| matches!(c, UpgradeChoice::NewWeapon { .. }))
                .map(|c| c.weapon())
                .collect();
            saw_new_weapon |= !names.is_empty();
            assert!(!names.contains(&"snowball"), "owned weapon offered as new");
            let before = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(before, names.len());
        }
        assert!(saw_new_weapon);
    }

    #[test]
    fn test_roll_amount_within_range() {
        let defs = catalog();
        let owned = owned_from(&defs, &["icicle"]);
        let ctx = RollContext {
            catalog: &defs,
            owned: &owned,
            max_weapons: 1,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            for choice in roll_upgrades(&ctx, &mut rng, 3).choices {
                if let UpgradeChoice::Attribute {
                    attribute,
                    rarity,
                    amount,
                    ..
                } = choice
                {
                    let range = value_range(attribute, rarity);
                    let (lo, hi) = (range.min.min(range.max), range.min.max(range.max));
                    assert!(amount >= lo - 1e-6 && amount <= hi + 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_roll_with_nothing_owned_offers_weapons() {
        let defs = catalog();
        let ctx = RollContext {
            catalog: &defs,
            owned: &[],
            max_weapons: 3,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let offer = roll_upgrades(&ctx, &mut rng, 3);
        assert_eq!(offer.len(), 3);
        assert!(offer
            .choices
            .iter()
            .all(|c| matches!(c, UpgradeChoice::NewWeapon { .. })));
    }

    #[test]
    fn test_roll_is_deterministic_for_a_seed() {
        let defs = catalog();
        let owned = owned_from(&defs, &["snowball", "ornament"]);
        let ctx = RollContext {
            catalog: &defs,
            owned: &owned,
            max_weapons: 3,
        };
        let a = roll_upgrades(&ctx, &mut ChaCha8Rng::seed_from_u64(99), 3);
        let b = roll_upgrades(&ctx, &mut ChaCha8Rng::seed_from_u64(99), 3);
        assert_eq!(a, b);
    }

    // ---- Apply ----

    #[test]
    fn test_apply_size_adds_scaled_amount() {
        let def = weapon("icicle", SpawnBehavior::OwnerFacing, None);
        let mut stats = WeaponStats::from_definition(&def);
        assert!(apply_attribute(&mut stats, &def, UpgradeAttribute::Size, 0.1));
        assert!((stats.size - 1.1).abs() < 1e-6);
        assert_eq!(stats.damage, 2.0, "other stats untouched");
    }

    #[test]
    fn test_apply_damage_scales_by_base() {
        let def = weapon("icicle", SpawnBehavior::OwnerFacing, None);
        let mut stats = WeaponStats::from_definition(&def);
        apply_attribute(&mut stats, &def, UpgradeAttribute::Damage, 0.25);
        assert!((stats.damage - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_apply_interval_is_floored() {
        let def = weapon("icicle", SpawnBehavior::OwnerFacing, None);
        let mut stats = WeaponStats::from_definition(&def);
        apply_attribute(&mut stats, &def, UpgradeAttribute::Interval, -0.2);
        assert!((stats.interval_ms - 800.0).abs() < 1e-3);
        apply_attribute(&mut stats, &def, UpgradeAttribute::Interval, -5.0);
        assert_eq!(stats.interval_ms, MIN_WEAPON_INTERVAL_MS);
    }

    #[test]
    fn test_apply_lifetime_requires_lifetime() {
        let def = weapon("icicle", SpawnBehavior::OwnerFacing, None);
        let mut stats = WeaponStats::from_definition(&def);
        let before = stats;
        assert!(!apply_attribute(&mut stats, &def, UpgradeAttribute::Lifetime, 0.5));
        assert_eq!(stats, before);

        let def = weapon("ornament", SpawnBehavior::OwnerFacing, Some(1000.0));
        let mut stats = WeaponStats::from_definition(&def);
        assert!(apply_attribute(&mut stats, &def, UpgradeAttribute::Lifetime, 0.5));
        assert_eq!(stats.lifetime_ms, Some(1500.0));
    }

    #[test]
    fn test_apply_amount_and_speed() {
        let def = weapon("icicle", SpawnBehavior::OwnerFacing, None);
        let mut stats = WeaponStats::from_definition(&def);
        apply_attribute(&mut stats, &def, UpgradeAttribute::Amount, 0.5);
        apply_attribute(&mut stats, &def, UpgradeAttribute::Speed, 0.1);
        assert!((stats.amount - 1.5).abs() < 1e-6);
        assert!((stats.speed - 0.6).abs() < 1e-6);
    }
}
