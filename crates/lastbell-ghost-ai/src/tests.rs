#[cfg(test)]
mod tests {
    use glam::Vec3;
    use lastbell_core::components::GhostBehavior;
    use lastbell_core::constants::*;
    use lastbell_core::enums::{DeathCause, GhostKind, GhostState, SoundCue};

    use crate::fsm::{evaluate, is_observed, yaw_toward, GhostContext, GhostEffect};
    use crate::profiles::{get_profile, spawn_position};

    /// Player at the origin looking down −Z; ghost at `ghost`.
    fn make_context(kind: GhostKind, ghost: Vec3) -> GhostContext {
        let profile = get_profile(kind);
        GhostContext {
            kind,
            state: profile.initial_state,
            behavior: GhostBehavior::for_kind(kind),
            stun_secs: 0.0,
            position: ghost,
            facing: 0.0,
            speed: profile.speed,
            player_position: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            view_dir: Vec3::NEG_Z,
            flashlight_on: true,
            player_crouching: false,
            player_hidden: false,
            dt: DT,
            roll: 0.5,
        }
    }

    fn kills(effects: &[GhostEffect]) -> bool {
        effects.iter().any(|e| matches!(e, GhostEffect::Kill(_)))
    }

    #[test]
    fn test_shadow_closes_distance() {
        let ctx = make_context(GhostKind::Shadow, Vec3::new(0.0, EYE_HEIGHT, 10.0));
        let update = evaluate(&ctx);
        let before = ctx.position.distance(ctx.player_position);
        let after = update.position.distance(ctx.player_position);
        assert!(after < before, "shadow should approach: {before} -> {after}");
        assert!((before - after - 3.8 * DT).abs() < 1e-4);
        assert!(!kills(&update.effects));
    }

    #[test]
    fn test_shadow_contact_wounds_and_kills() {
        let ctx = make_context(GhostKind::Shadow, Vec3::new(0.0, EYE_HEIGHT, 1.0));
        let update = evaluate(&ctx);
        assert!(update.effects.contains(&GhostEffect::Damage(SHADOW_CONTACT_DAMAGE)));
        assert!(update.effects.contains(&GhostEffect::ApplyBleeding));
        assert!(update
            .effects
            .contains(&GhostEffect::Kill(DeathCause::Ghost(GhostKind::Shadow))));
    }

    #[test]
    fn test_crawler_speeds_up_in_light() {
        let lit = make_context(GhostKind::Crawler, Vec3::new(0.0, 3.8, 10.0));
        assert_eq!(evaluate(&lit).speed, 6.0);

        let dark = GhostContext {
            flashlight_on: false,
            ..lit
        };
        assert_eq!(evaluate(&dark).speed, 4.0);

        let far = make_context(GhostKind::Crawler, Vec3::new(0.0, 3.8, 20.0));
        assert_eq!(evaluate(&far).speed, 4.0);
    }

    #[test]
    fn test_mannequin_in_view_does_not_move() {
        // Ghost straight ahead along −Z
        let ctx = make_context(GhostKind::Mannequin, Vec3::new(0.0, EYE_HEIGHT, -10.0));
        let update = evaluate(&ctx);
        assert_eq!(update.position, ctx.position);
        assert_eq!(update.state, GhostState::Frozen);
        assert_eq!(update.behavior, GhostBehavior::Mannequin { seen: true });
    }

    #[test]
    fn test_mannequin_out_of_view_moves_closer_on_ground_plane() {
        // Ghost behind the player
        let ctx = make_context(GhostKind::Mannequin, Vec3::new(0.0, 0.5, 10.0));
        let update = evaluate(&ctx);
        let before = ctx.position.distance(ctx.player_position);
        let after = update.position.distance(ctx.player_position);
        assert!(after < before, "mannequin should approach: {before} -> {after}");
        assert_eq!(update.position.y, ctx.position.y, "movement must stay flat");
        assert_eq!(update.state, GhostState::Chasing);
        assert!(update.state_changed);
    }

    #[test]
    fn test_mannequin_ignores_stun_timer() {
        let mut ctx = make_context(GhostKind::Mannequin, Vec3::new(0.0, EYE_HEIGHT, 10.0));
        ctx.stun_secs = 10.0;
        let update = evaluate(&ctx);
        assert_ne!(update.position, ctx.position);
    }

    #[test]
    fn test_screamer_detects_non_crouching_player() {
        let mut ctx = make_context(GhostKind::Screamer, Vec3::new(0.0, EYE_HEIGHT, 9.0));
        let update = evaluate(&ctx);
        assert_eq!(update.state, GhostState::Screaming);
        assert!(update
            .effects
            .contains(&GhostEffect::SanityPenalty(SCREAMER_SANITY_PENALTY)));
        assert!(update.effects.contains(&GhostEffect::StopRunning));
        assert!(update.effects.contains(&GhostEffect::Cue(SoundCue::Scream)));

        // Already screaming: no second penalty
        ctx.state = GhostState::Screaming;
        let again = evaluate(&ctx);
        assert!(!again
            .effects
            .iter()
            .any(|e| matches!(e, GhostEffect::SanityPenalty(_))));
    }

    #[test]
    fn test_screamer_ignores_crouching_player() {
        let mut ctx = make_context(GhostKind::Screamer, Vec3::new(0.0, EYE_HEIGHT, 5.0));
        ctx.player_crouching = true;
        let update = evaluate(&ctx);
        assert_eq!(update.state, GhostState::Wandering);
        assert!(update.effects.is_empty());
        assert!(update.position.z > ctx.position.z, "screamer wanders toward +Z");
    }

    #[test]
    fn test_screaming_contact_kills() {
        let mut ctx = make_context(GhostKind::Screamer, Vec3::new(0.0, EYE_HEIGHT, 1.5));
        ctx.state = GhostState::Screaming;
        assert!(kills(&evaluate(&ctx).effects));
    }

    #[test]
    fn test_stunned_ghost_holds_then_resumes() {
        let mut ctx = make_context(GhostKind::Phantom, Vec3::new(0.0, EYE_HEIGHT, 5.0));
        ctx.state = GhostState::Frozen;
        ctx.stun_secs = 1.0;
        let update = evaluate(&ctx);
        assert_eq!(update.position, ctx.position);
        assert_eq!(update.state, GhostState::Frozen);
        assert!((update.stun_secs - (1.0 - DT)).abs() < 1e-6);

        ctx.stun_secs = DT * 0.5;
        let update = evaluate(&ctx);
        assert_eq!(update.state, GhostState::Chasing);
        assert_eq!(update.stun_secs, 0.0);
    }

    #[test]
    fn test_stunned_screamer_resumes_chasing_without_second_scream() {
        let mut ctx = make_context(GhostKind::Screamer, Vec3::new(0.0, EYE_HEIGHT, 5.0));
        ctx.state = GhostState::Frozen;
        ctx.stun_secs = DT * 0.5;
        let update = evaluate(&ctx);
        assert_eq!(update.state, GhostState::Chasing);

        // In detection range and uncrouched, but the scream is spent
        ctx.state = update.state;
        ctx.stun_secs = update.stun_secs;
        let after = evaluate(&ctx);
        assert_eq!(after.state, GhostState::Chasing);
        assert!(after.effects.is_empty());
    }

    #[test]
    fn test_stunned_ghost_in_contact_range_does_not_kill() {
        let mut ctx = make_context(GhostKind::Shadow, Vec3::new(0.0, EYE_HEIGHT, 1.0));
        ctx.state = GhostState::Frozen;
        ctx.stun_secs = 5.0;
        assert!(evaluate(&ctx).effects.is_empty());
    }

    #[test]
    fn test_hallucination_contact_despawns_without_death() {
        let ctx = make_context(GhostKind::Hallucination, Vec3::new(0.0, EYE_HEIGHT, -0.5));
        let update = evaluate(&ctx);
        assert!(update.effects.contains(&GhostEffect::Despawn));
        assert!(update
            .effects
            .contains(&GhostEffect::SanityPenalty(HALLUCINATION_SANITY_PENALTY)));
        assert!(!kills(&update.effects));
    }

    #[test]
    fn test_far_ghost_despawns() {
        let ctx = make_context(GhostKind::Shadow, Vec3::new(0.0, EYE_HEIGHT, 50.0));
        let update = evaluate(&ctx);
        assert_eq!(update.effects, vec![GhostEffect::Despawn]);
        assert_eq!(update.position, ctx.position);
    }

    #[test]
    fn test_hidden_player_freezes_distant_ghosts() {
        let mut ctx = make_context(GhostKind::Shadow, Vec3::new(0.0, EYE_HEIGHT, 5.0));
        ctx.player_hidden = true;
        let update = evaluate(&ctx);
        assert_eq!(update.position, ctx.position);

        ctx.position = Vec3::new(0.0, EYE_HEIGHT, 1.2);
        assert!(kills(&evaluate(&ctx).effects));
    }

    #[test]
    fn test_view_cone_threshold() {
        let eye = Vec3::ZERO;
        assert!(is_observed(Vec3::NEG_Z, eye, Vec3::new(0.0, 0.0, -5.0)));
        // Just past 60 degrees off axis
        let edge = Vec3::new(3.0_f32.sqrt() * 0.5, 0.0, -0.5) * 4.0;
        assert!(!is_observed(Vec3::NEG_Z, eye, edge + Vec3::new(0.01, 0.0, 0.0)));
        assert!(!is_observed(Vec3::NEG_Z, eye, Vec3::new(5.0, 0.0, 0.0)));
        assert!(!is_observed(Vec3::NEG_Z, eye, Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_yaw_toward_matches_view_convention() {
        assert!(yaw_toward(Vec3::NEG_Z).abs() < 1e-6);
        assert!((yaw_toward(Vec3::NEG_X) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_positions() {
        let player = Vec3::new(0.0, EYE_HEIGHT, -40.0);
        let view = Vec3::NEG_Z;

        let shadow = spawn_position(GhostKind::Shadow, player, view);
        assert!((shadow - Vec3::new(0.0, EYE_HEIGHT, -22.0)).length() < 1e-4);

        let crawler = spawn_position(GhostKind::Crawler, player, view);
        assert_eq!(crawler.y, CRAWLER_SPAWN_HEIGHT);
        assert!((crawler.z - (-20.0)).abs() < 1e-4);

        let mannequin = spawn_position(GhostKind::Mannequin, player, view);
        assert!((mannequin.z - (-65.0)).abs() < 1e-4);

        let phantom = spawn_position(GhostKind::Phantom, player, view);
        assert!((phantom - Vec3::new(5.0, EYE_HEIGHT, -35.0)).length() < 1e-4);
    }
}
