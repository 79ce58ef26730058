//! The static knowledge baked into the decoder: which attribute shape each
//! replicated property decodes as, how classes inherit from each other, which
//! object an actor's dispatch table hangs off of, and which objects spawn
//! with an initial trajectory. Compiled into perfect hash maps so the inner
//! loop never hashes strings at runtime.

use crate::network::attributes::AttributeTag;
use crate::network::SpawnTrajectory;

/// Object names whose new actors are trailed by an initial location (and for
/// balls and cars, a rotation).
pub(crate) const SPAWN_TRAJECTORIES: &[(&str, SpawnTrajectory)] = &[
    (
        "Archetypes.Ball.Ball_BasketBall_Mutator",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.Ball.Ball_BasketBall",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.Ball.Ball_Basketball",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.Ball.Ball_Breakout",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.Ball.Ball_Default",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.Ball.Ball_Puck",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.Ball.Ball_Anniversary",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.Ball.Ball_Haunted",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.Ball.Ball_God",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.Ball.Ball_Training",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.Ball.CubeBall",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.Car.Car_Default",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.GameEvent.GameEvent_Season:CarArchetype",
        SpawnTrajectory::LocationAndRotation,
    ),
    (
        "Archetypes.CarComponents.CarComponent_Boost",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.CarComponents.CarComponent_Dodge",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.CarComponents.CarComponent_DoubleJump",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.CarComponents.CarComponent_FlipCar",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.CarComponents.CarComponent_Jump",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_BallFreeze",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_BallGrapplingHook",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_BallLasso",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_BallSpring",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_BallVelcro",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_Batarang",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_BoostOverride",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_CarSpring",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_GravityWell",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_StrongHit",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_Swapper",
        SpawnTrajectory::Location,
    ),
    (
        "Archetypes.SpecialPickups.SpecialPickup_Tornado",
        SpawnTrajectory::Location,
    ),
    ("TAGame.Default__PRI_TA", SpawnTrajectory::Location),
    (
        "TAGame.Default__CameraSettingsActor_TA",
        SpawnTrajectory::Location,
    ),
    (
        "TheWorld:PersistentLevel.BreakOutActor_Platform_TA",
        SpawnTrajectory::Location,
    ),
    (
        "TheWorld:PersistentLevel.CrowdActor_TA",
        SpawnTrajectory::Location,
    ),
    (
        "TheWorld:PersistentLevel.CrowdManager_TA",
        SpawnTrajectory::Location,
    ),
    (
        "TheWorld:PersistentLevel.InMapScoreboard_TA",
        SpawnTrajectory::Location,
    ),
    (
        "TheWorld:PersistentLevel.VehiclePickup_Boost_TA",
        SpawnTrajectory::Location,
    ),
];

/// Class inheritance. The footer's class net cache encodes parents as back
/// references that are frequently missing, so the chain is repaired from
/// this table while flattening.
pub(crate) static PARENT_CLASSES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "Engine.Actor" => "Core.Object",
    "Engine.GameReplicationInfo" => "Engine.ReplicationInfo",
    "Engine.Info" => "Engine.Actor",
    "Engine.Pawn" => "Engine.Actor",
    "Engine.PlayerReplicationInfo" => "Engine.ReplicationInfo",
    "Engine.ReplicationInfo" => "Engine.Info",
    "Engine.TeamInfo" => "Engine.ReplicationInfo",
    "ProjectX.GRI_X" => "Engine.GameReplicationInfo",
    "ProjectX.Pawn_X" => "Engine.Pawn",
    "ProjectX.PRI_X" => "Engine.PlayerReplicationInfo",
    "TAGame.Ball_TA" => "TAGame.RBActor_TA",
    "TAGame.Ball_Breakout_TA" => "TAGame.Ball_TA",
    "TAGame.Ball_God_TA" => "TAGame.Ball_TA",
    "TAGame.Ball_Haunted_TA" => "TAGame.Ball_TA",
    "TAGame.BreakOutActor_Platform_TA" => "Engine.Actor",
    "TAGame.CameraSettingsActor_TA" => "Engine.ReplicationInfo",
    "TAGame.Car_Season_TA" => "TAGame.Car_TA",
    "TAGame.Car_TA" => "TAGame.Vehicle_TA",
    "TAGame.CarComponent_Boost_TA" => "TAGame.CarComponent_TA",
    "TAGame.CarComponent_Dodge_TA" => "TAGame.CarComponent_TA",
    "TAGame.CarComponent_DoubleJump_TA" => "TAGame.CarComponent_TA",
    "TAGame.CarComponent_FlipCar_TA" => "TAGame.CarComponent_TA",
    "TAGame.CarComponent_Jump_TA" => "TAGame.CarComponent_TA",
    "TAGame.CarComponent_TA" => "Engine.ReplicationInfo",
    "TAGame.CrowdActor_TA" => "Engine.ReplicationInfo",
    "TAGame.CrowdManager_TA" => "Engine.ReplicationInfo",
    "TAGame.GameEvent_Season_TA" => "TAGame.GameEvent_Soccar_TA",
    "TAGame.GameEvent_Soccar_TA" => "TAGame.GameEvent_Team_TA",
    "TAGame.GameEvent_SoccarPrivate_TA" => "TAGame.GameEvent_Soccar_TA",
    "TAGame.GameEvent_SoccarSplitscreen_TA" => "TAGame.GameEvent_SoccarPrivate_TA",
    "TAGame.GameEvent_TA" => "Engine.ReplicationInfo",
    "TAGame.GameEvent_Team_TA" => "TAGame.GameEvent_TA",
    "TAGame.GRI_TA" => "ProjectX.GRI_X",
    "TAGame.HauntedBallTrapTrigger_TA" => "Engine.Actor",
    "TAGame.InMapScoreboard_TA" => "Engine.Actor",
    "TAGame.MaxTimeWarningData_TA" => "Engine.ReplicationInfo",
    "TAGame.PRI_Breakout_TA" => "TAGame.PRI_TA",
    "TAGame.PRI_TA" => "ProjectX.PRI_X",
    "TAGame.RBActor_TA" => "ProjectX.Pawn_X",
    "TAGame.RumblePickups_TA" => "Engine.ReplicationInfo",
    "TAGame.SpecialPickup_BallCarSpring_TA" => "TAGame.SpecialPickup_Spring_TA",
    "TAGame.SpecialPickup_BallFreeze_TA" => "TAGame.SpecialPickup_Targeted_TA",
    "TAGame.SpecialPickup_BallGravity_TA" => "TAGame.SpecialPickup_TA",
    "TAGame.SpecialPickup_BallLasso_TA" => "TAGame.SpecialPickup_GrapplingHook_TA",
    "TAGame.SpecialPickup_BallVelcro_TA" => "TAGame.SpecialPickup_TA",
    "TAGame.SpecialPickup_Batarang_TA" => "TAGame.SpecialPickup_BallLasso_TA",
    "TAGame.SpecialPickup_BoostOverride_TA" => "TAGame.SpecialPickup_Targeted_TA",
    "TAGame.SpecialPickup_GrapplingHook_TA" => "TAGame.SpecialPickup_Targeted_TA",
    "TAGame.SpecialPickup_HitForce_TA" => "TAGame.SpecialPickup_TA",
    "TAGame.SpecialPickup_Spring_TA" => "TAGame.SpecialPickup_Targeted_TA",
    "TAGame.SpecialPickup_Swapper_TA" => "TAGame.SpecialPickup_Targeted_TA",
    "TAGame.SpecialPickup_TA" => "TAGame.CarComponent_TA",
    "TAGame.SpecialPickup_Targeted_TA" => "TAGame.SpecialPickup_TA",
    "TAGame.SpecialPickup_Tornado_TA" => "TAGame.SpecialPickup_TA",
    "TAGame.Team_Soccar_TA" => "TAGame.Team_TA",
    "TAGame.Team_TA" => "Engine.TeamInfo",
    "TAGame.Vehicle_TA" => "TAGame.RBActor_TA",
    "TAGame.VehiclePickup_Boost_TA" => "TAGame.VehiclePickup_TA",
    "TAGame.VehiclePickup_TA" => "Engine.ReplicationInfo",
};

/// Maps an actor's object to the object its dispatch table is keyed under.
/// Most actors spawn as archetype objects while the class net cache is keyed
/// by the class object, so nearly every update goes through this table.
pub(crate) static OBJECT_PARENTS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "Archetypes.Ball.Ball_BasketBall_Mutator" => "TAGame.Ball_TA",
    "Archetypes.Ball.Ball_BasketBall" => "TAGame.Ball_TA",
    "Archetypes.Ball.Ball_Basketball" => "TAGame.Ball_TA",
    "Archetypes.Ball.Ball_Breakout" => "TAGame.Ball_Breakout_TA",
    "Archetypes.Ball.Ball_Default" => "TAGame.Ball_TA",
    "Archetypes.Ball.Ball_Puck" => "TAGame.Ball_TA",
    "Archetypes.Ball.Ball_Anniversary" => "TAGame.Ball_TA",
    "Archetypes.Ball.Ball_Haunted" => "TAGame.Ball_Haunted_TA",
    "Archetypes.Ball.Ball_God" => "TAGame.Ball_God_TA",
    "Archetypes.Ball.Ball_Training" => "TAGame.Ball_TA",
    "Archetypes.Ball.CubeBall" => "TAGame.Ball_TA",
    "Archetypes.Car.Car_Default" => "TAGame.Car_TA",
    "Archetypes.CarComponents.CarComponent_Boost" => "TAGame.CarComponent_Boost_TA",
    "Archetypes.CarComponents.CarComponent_Dodge" => "TAGame.CarComponent_Dodge_TA",
    "Archetypes.CarComponents.CarComponent_DoubleJump" => "TAGame.CarComponent_DoubleJump_TA",
    "Archetypes.CarComponents.CarComponent_FlipCar" => "TAGame.CarComponent_FlipCar_TA",
    "Archetypes.CarComponents.CarComponent_Jump" => "TAGame.CarComponent_Jump_TA",
    "Archetypes.GameEvent.GameEvent_Basketball" => "TAGame.GameEvent_Soccar_TA",
    "Archetypes.GameEvent.GameEvent_BasketballPrivate" => "TAGame.GameEvent_SoccarPrivate_TA",
    "Archetypes.GameEvent.GameEvent_BasketballSplitscreen" => "TAGame.GameEvent_SoccarSplitscreen_TA",
    "Archetypes.GameEvent.GameEvent_Breakout" => "TAGame.GameEvent_Soccar_TA",
    "Archetypes.GameEvent.GameEvent_Hockey" => "TAGame.GameEvent_Soccar_TA",
    "Archetypes.GameEvent.GameEvent_HockeyPrivate" => "TAGame.GameEvent_SoccarPrivate_TA",
    "Archetypes.GameEvent.GameEvent_HockeySplitscreen" => "TAGame.GameEvent_SoccarSplitscreen_TA",
    "Archetypes.GameEvent.GameEvent_Items" => "TAGame.GameEvent_Soccar_TA",
    "Archetypes.GameEvent.GameEvent_Season" => "TAGame.GameEvent_Season_TA",
    "Archetypes.GameEvent.GameEvent_Soccar" => "TAGame.GameEvent_Soccar_TA",
    "Archetypes.GameEvent.GameEvent_SoccarLan" => "TAGame.GameEvent_Soccar_TA",
    "Archetypes.GameEvent.GameEvent_SoccarPrivate" => "TAGame.GameEvent_SoccarPrivate_TA",
    "Archetypes.GameEvent.GameEvent_SoccarSplitscreen" => "TAGame.GameEvent_SoccarSplitscreen_TA",
    "Archetypes.GameEvent.GameEvent_Season:CarArchetype" => "TAGame.Car_TA",
    "Archetypes.SpecialPickups.SpecialPickup_BallFreeze" => "TAGame.SpecialPickup_BallFreeze_TA",
    "Archetypes.SpecialPickups.SpecialPickup_BallGrapplingHook" => "TAGame.SpecialPickup_GrapplingHook_TA",
    "Archetypes.SpecialPickups.SpecialPickup_BallLasso" => "TAGame.SpecialPickup_BallLasso_TA",
    "Archetypes.SpecialPickups.SpecialPickup_BallSpring" => "TAGame.SpecialPickup_BallCarSpring_TA",
    "Archetypes.SpecialPickups.SpecialPickup_BallVelcro" => "TAGame.SpecialPickup_BallVelcro_TA",
    "Archetypes.SpecialPickups.SpecialPickup_Batarang" => "TAGame.SpecialPickup_Batarang_TA",
    "Archetypes.SpecialPickups.SpecialPickup_BoostOverride" => "TAGame.SpecialPickup_BoostOverride_TA",
    "Archetypes.SpecialPickups.SpecialPickup_CarSpring" => "TAGame.SpecialPickup_BallCarSpring_TA",
    "Archetypes.SpecialPickups.SpecialPickup_GravityWell" => "TAGame.SpecialPickup_BallGravity_TA",
    "Archetypes.SpecialPickups.SpecialPickup_StrongHit" => "TAGame.SpecialPickup_HitForce_TA",
    "Archetypes.SpecialPickups.SpecialPickup_Swapper" => "TAGame.SpecialPickup_Swapper_TA",
    "Archetypes.SpecialPickups.SpecialPickup_Tornado" => "TAGame.SpecialPickup_Tornado_TA",
    "Archetypes.Teams.Team0" => "TAGame.Team_Soccar_TA",
    "Archetypes.Teams.Team1" => "TAGame.Team_Soccar_TA",
    "TAGame.Default__CameraSettingsActor_TA" => "TAGame.CameraSettingsActor_TA",
    "TAGame.Default__MaxTimeWarningData_TA" => "TAGame.MaxTimeWarningData_TA",
    "TAGame.Default__PRI_TA" => "TAGame.PRI_TA",
    "TheWorld:PersistentLevel.BreakOutActor_Platform_TA" => "TAGame.BreakOutActor_Platform_TA",
    "TheWorld:PersistentLevel.CrowdActor_TA" => "TAGame.CrowdActor_TA",
    "TheWorld:PersistentLevel.CrowdManager_TA" => "TAGame.CrowdManager_TA",
    "TheWorld:PersistentLevel.HauntedBallTrapTrigger_TA" => "TAGame.HauntedBallTrapTrigger_TA",
    "TheWorld:PersistentLevel.InMapScoreboard_TA" => "TAGame.InMapScoreboard_TA",
    "TheWorld:PersistentLevel.VehiclePickup_Boost_TA" => "TAGame.VehiclePickup_Boost_TA",
};

/// Which shape each replicated property decodes as. An object missing from
/// this table only fails the parse if the stream actually updates it.
pub(crate) static ATTRIBUTES: phf::Map<&'static str, AttributeTag> = phf::phf_map! {
    "Engine.Actor:bBlockActors" => AttributeTag::Boolean,
    "Engine.Actor:bCollideActors" => AttributeTag::Boolean,
    "Engine.Actor:bHidden" => AttributeTag::Boolean,
    "Engine.Actor:bNetOwner" => AttributeTag::Boolean,
    "Engine.Actor:bTearOff" => AttributeTag::Boolean,
    "Engine.Actor:DrawScale" => AttributeTag::Float,
    "Engine.Actor:RemoteRole" => AttributeTag::Enum,
    "Engine.Actor:Role" => AttributeTag::Enum,
    "Engine.Actor:Rotation" => AttributeTag::RotationTag,
    "Engine.GameReplicationInfo:bMatchIsOver" => AttributeTag::Boolean,
    "Engine.GameReplicationInfo:GameClass" => AttributeTag::ActiveActor,
    "Engine.GameReplicationInfo:ServerName" => AttributeTag::String,
    "Engine.Pawn:PlayerReplicationInfo" => AttributeTag::ActiveActor,
    "Engine.PlayerReplicationInfo:bBot" => AttributeTag::Boolean,
    "Engine.PlayerReplicationInfo:bIsSpectator" => AttributeTag::Boolean,
    "Engine.PlayerReplicationInfo:bReadyToPlay" => AttributeTag::Boolean,
    "Engine.PlayerReplicationInfo:bTimedOut" => AttributeTag::Boolean,
    "Engine.PlayerReplicationInfo:bWaitingPlayer" => AttributeTag::Boolean,
    "Engine.PlayerReplicationInfo:Ping" => AttributeTag::Byte,
    "Engine.PlayerReplicationInfo:PlayerID" => AttributeTag::Int,
    "Engine.PlayerReplicationInfo:PlayerName" => AttributeTag::String,
    "Engine.PlayerReplicationInfo:RemoteUserData" => AttributeTag::String,
    "Engine.PlayerReplicationInfo:Score" => AttributeTag::Int,
    "Engine.PlayerReplicationInfo:Team" => AttributeTag::ActiveActor,
    "Engine.PlayerReplicationInfo:UniqueId" => AttributeTag::UniqueId,
    "Engine.ReplicatedActor_ORS:ReplicatedOwner" => AttributeTag::ActiveActor,
    "Engine.TeamInfo:Score" => AttributeTag::Int,
    "ProjectX.GRI_X:bGameStarted" => AttributeTag::Boolean,
    "ProjectX.GRI_X:GameServerID" => AttributeTag::QWordString,
    "ProjectX.GRI_X:MatchGUID" => AttributeTag::String,
    "ProjectX.GRI_X:MatchGuid" => AttributeTag::String,
    "ProjectX.GRI_X:ReplicatedGameMutatorIndex" => AttributeTag::Int,
    "ProjectX.GRI_X:ReplicatedGamePlaylist" => AttributeTag::Int,
    "ProjectX.GRI_X:ReplicatedServerRegion" => AttributeTag::String,
    "ProjectX.GRI_X:Reservations" => AttributeTag::Reservation,
    "TAGame.Ball_Breakout_TA:AppliedDamage" => AttributeTag::AppliedDamage,
    "TAGame.Ball_Breakout_TA:DamageIndex" => AttributeTag::Int,
    "TAGame.Ball_Breakout_TA:LastTeamTouch" => AttributeTag::Byte,
    "TAGame.Ball_God_TA:TargetSpeed" => AttributeTag::Float,
    "TAGame.Ball_Haunted_TA:bIsBallBeamed" => AttributeTag::Boolean,
    "TAGame.Ball_Haunted_TA:DeactivatedGoalIndex" => AttributeTag::Byte,
    "TAGame.Ball_Haunted_TA:LastTeamTouch" => AttributeTag::Byte,
    "TAGame.Ball_Haunted_TA:ReplicatedBeamBrokenValue" => AttributeTag::Byte,
    "TAGame.Ball_Haunted_TA:TotalActiveBeams" => AttributeTag::Byte,
    "TAGame.Ball_TA:GameEvent" => AttributeTag::ActiveActor,
    "TAGame.Ball_TA:HitTeamNum" => AttributeTag::Byte,
    "TAGame.Ball_TA:ReplicatedAddedCarBounceScale" => AttributeTag::Float,
    "TAGame.Ball_TA:ReplicatedBallGravityDirection" => AttributeTag::Location,
    "TAGame.Ball_TA:ReplicatedBallImpulse" => AttributeTag::Impulse,
    "TAGame.Ball_TA:ReplicatedBallMaxLinearSpeedScale" => AttributeTag::Float,
    "TAGame.Ball_TA:ReplicatedBallScale" => AttributeTag::Float,
    "TAGame.Ball_TA:ReplicatedExplosionData" => AttributeTag::Explosion,
    "TAGame.Ball_TA:ReplicatedExplosionDataExtended" => AttributeTag::ExtendedExplosion,
    "TAGame.Ball_TA:ReplicatedPhysMatOverride" => AttributeTag::ActiveActor,
    "TAGame.Ball_TA:ReplicatedWorldBounceScale" => AttributeTag::Float,
    "TAGame.BreakOutActor_Platform_TA:DamageState" => AttributeTag::DamageState,
    "TAGame.CameraSettingsActor_TA:bFreecam" => AttributeTag::Boolean,
    "TAGame.CameraSettingsActor_TA:bMouseCameraToggleEnabled" => AttributeTag::Boolean,
    "TAGame.CameraSettingsActor_TA:bUsingBehindView" => AttributeTag::Boolean,
    "TAGame.CameraSettingsActor_TA:bUsingSecondaryCamera" => AttributeTag::Boolean,
    "TAGame.CameraSettingsActor_TA:bUsingSwivel" => AttributeTag::Boolean,
    "TAGame.CameraSettingsActor_TA:CameraPitch" => AttributeTag::Byte,
    "TAGame.CameraSettingsActor_TA:CameraYaw" => AttributeTag::Byte,
    "TAGame.CameraSettingsActor_TA:PRI" => AttributeTag::ActiveActor,
    "TAGame.CameraSettingsActor_TA:ProfileSettings" => AttributeTag::CamSettings,
    "TAGame.Car_TA:AddedBallForceMultiplier" => AttributeTag::Float,
    "TAGame.Car_TA:AddedCarForceMultiplier" => AttributeTag::Float,
    "TAGame.Car_TA:AttachedPickup" => AttributeTag::ActiveActor,
    "TAGame.Car_TA:ClubColors" => AttributeTag::ClubColors,
    "TAGame.Car_TA:ReplicatedCarScale" => AttributeTag::Float,
    "TAGame.Car_TA:ReplicatedDemolish" => AttributeTag::Demolish,
    "TAGame.Car_TA:ReplicatedDemolish_CustomFX" => AttributeTag::DemolishFx,
    "TAGame.Car_TA:ReplicatedDemolishGoalExplosion" => AttributeTag::DemolishFx,
    "TAGame.Car_TA:RumblePickups" => AttributeTag::ActiveActor,
    "TAGame.Car_TA:TeamPaint" => AttributeTag::TeamPaint,
    "TAGame.CarComponent_Boost_TA:bNoBoost" => AttributeTag::Boolean,
    "TAGame.CarComponent_Boost_TA:BoostModifier" => AttributeTag::Float,
    "TAGame.CarComponent_Boost_TA:bUnlimitedBoost2" => AttributeTag::Boolean,
    "TAGame.CarComponent_Boost_TA:RechargeDelay" => AttributeTag::Float,
    "TAGame.CarComponent_Boost_TA:RechargeRate" => AttributeTag::Float,
    "TAGame.CarComponent_Boost_TA:ReplicatedBoost" => AttributeTag::FlaggedByte,
    "TAGame.CarComponent_Boost_TA:ReplicatedBoostAmount" => AttributeTag::Byte,
    "TAGame.CarComponent_Boost_TA:UnlimitedBoostRefCount" => AttributeTag::Int,
    "TAGame.CarComponent_Dodge_TA:DodgeImpulse" => AttributeTag::Location,
    "TAGame.CarComponent_Dodge_TA:DodgeTorque" => AttributeTag::Location,
    "TAGame.CarComponent_FlipCar_TA:bFlipRight" => AttributeTag::Boolean,
    "TAGame.CarComponent_FlipCar_TA:FlipCarTime" => AttributeTag::Float,
    "TAGame.CarComponent_TA:ReplicatedActive" => AttributeTag::Byte,
    "TAGame.CarComponent_TA:ReplicatedActivityTime" => AttributeTag::Float,
    "TAGame.CarComponent_TA:Vehicle" => AttributeTag::ActiveActor,
    "TAGame.CrowdActor_TA:GameEvent" => AttributeTag::ActiveActor,
    "TAGame.CrowdActor_TA:ModifiedNoise" => AttributeTag::Float,
    "TAGame.CrowdActor_TA:ReplicatedCountDownNumber" => AttributeTag::Int,
    "TAGame.CrowdActor_TA:ReplicatedOneShotSound" => AttributeTag::ActiveActor,
    "TAGame.CrowdActor_TA:ReplicatedRoundCountDownNumber" => AttributeTag::Int,
    "TAGame.CrowdManager_TA:GameEvent" => AttributeTag::ActiveActor,
    "TAGame.CrowdManager_TA:ReplicatedGlobalOneShotSound" => AttributeTag::ActiveActor,
    "TAGame.GameEvent_Soccar_TA:bBallHasBeenHit" => AttributeTag::Boolean,
    "TAGame.GameEvent_Soccar_TA:bClubMatch" => AttributeTag::Boolean,
    "TAGame.GameEvent_Soccar_TA:bMatchEnded" => AttributeTag::Boolean,
    "TAGame.GameEvent_Soccar_TA:bOverTime" => AttributeTag::Boolean,
    "TAGame.GameEvent_Soccar_TA:bUnlimitedTime" => AttributeTag::Boolean,
    "TAGame.GameEvent_Soccar_TA:GameTime" => AttributeTag::Int,
    "TAGame.GameEvent_Soccar_TA:GameWinner" => AttributeTag::ActiveActor,
    "TAGame.GameEvent_Soccar_TA:MatchWinner" => AttributeTag::ActiveActor,
    "TAGame.GameEvent_Soccar_TA:MaxScore" => AttributeTag::Int,
    "TAGame.GameEvent_Soccar_TA:MVP" => AttributeTag::ActiveActor,
    "TAGame.GameEvent_Soccar_TA:ReplicatedMusicStinger" => AttributeTag::MusicStinger,
    "TAGame.GameEvent_Soccar_TA:ReplicatedScoredOnTeam" => AttributeTag::Byte,
    "TAGame.GameEvent_Soccar_TA:ReplicatedServerPerformanceState" => AttributeTag::Byte,
    "TAGame.GameEvent_Soccar_TA:ReplicatedStatEvent" => AttributeTag::StatEvent,
    "TAGame.GameEvent_Soccar_TA:RoundNum" => AttributeTag::Int,
    "TAGame.GameEvent_Soccar_TA:SecondsRemaining" => AttributeTag::Int,
    "TAGame.GameEvent_Soccar_TA:SeriesLength" => AttributeTag::Int,
    "TAGame.GameEvent_Soccar_TA:SubRulesArchetype" => AttributeTag::ActiveActor,
    "TAGame.GameEvent_TA:bCanVoteToForfeit" => AttributeTag::Boolean,
    "TAGame.GameEvent_TA:bHasLeaveMatchPenalty" => AttributeTag::Boolean,
    "TAGame.GameEvent_TA:BotSkill" => AttributeTag::Int,
    "TAGame.GameEvent_TA:GameMode" => AttributeTag::GameMode,
    "TAGame.GameEvent_TA:MatchTypeClass" => AttributeTag::ActiveActor,
    "TAGame.GameEvent_TA:ReplicatedGameStateTimeRemaining" => AttributeTag::Int,
    "TAGame.GameEvent_TA:ReplicatedRoundCountDownNumber" => AttributeTag::Int,
    "TAGame.GameEvent_TA:ReplicatedStateIndex" => AttributeTag::Enum,
    "TAGame.GameEvent_TA:ReplicatedStateName" => AttributeTag::Int,
    "TAGame.GameEvent_Team_TA:bForfeit" => AttributeTag::Boolean,
    "TAGame.GameEvent_Team_TA:MaxTeamSize" => AttributeTag::Int,
    "TAGame.GRI_TA:NewDedicatedServerIP" => AttributeTag::String,
    "TAGame.MaxTimeWarningData_TA:EndGameEpochTime" => AttributeTag::Int64,
    "TAGame.MaxTimeWarningData_TA:EndGameWarningEpochTime" => AttributeTag::Int64,
    "TAGame.PRI_Breakout_TA:DamageIndex" => AttributeTag::Int,
    "TAGame.PRI_Breakout_TA:Damage" => AttributeTag::Int,
    "TAGame.PRI_TA:bIsDistracted" => AttributeTag::Boolean,
    "TAGame.PRI_TA:bIsInSplitScreen" => AttributeTag::Boolean,
    "TAGame.PRI_TA:bMatchAdmin" => AttributeTag::Boolean,
    "TAGame.PRI_TA:bOnlineLoadoutSet" => AttributeTag::Boolean,
    "TAGame.PRI_TA:bOnlineLoadoutsSet" => AttributeTag::Boolean,
    "TAGame.PRI_TA:bReady" => AttributeTag::Boolean,
    "TAGame.PRI_TA:bUsingBehindView" => AttributeTag::Boolean,
    "TAGame.PRI_TA:bUsingItems" => AttributeTag::Boolean,
    "TAGame.PRI_TA:bUsingSecondaryCamera" => AttributeTag::Boolean,
    "TAGame.PRI_TA:BotProductName" => AttributeTag::Int,
    "TAGame.PRI_TA:CameraPitch" => AttributeTag::Byte,
    "TAGame.PRI_TA:CameraSettings" => AttributeTag::CamSettings,
    "TAGame.PRI_TA:CameraYaw" => AttributeTag::Byte,
    "TAGame.PRI_TA:ClientLoadout" => AttributeTag::Loadout,
    "TAGame.PRI_TA:ClientLoadoutOnline" => AttributeTag::LoadoutOnline,
    "TAGame.PRI_TA:ClientLoadouts" => AttributeTag::TeamLoadout,
    "TAGame.PRI_TA:ClientLoadoutsOnline" => AttributeTag::LoadoutsOnline,
    "TAGame.PRI_TA:ClubID" => AttributeTag::Int64,
    "TAGame.PRI_TA:MatchAssists" => AttributeTag::Int,
    "TAGame.PRI_TA:MatchBreakoutDamage" => AttributeTag::Int,
    "TAGame.PRI_TA:MatchGoals" => AttributeTag::Int,
    "TAGame.PRI_TA:MatchSaves" => AttributeTag::Int,
    "TAGame.PRI_TA:MatchScore" => AttributeTag::Int,
    "TAGame.PRI_TA:MatchShots" => AttributeTag::Int,
    "TAGame.PRI_TA:MaxTimeTillItem" => AttributeTag::Int,
    "TAGame.PRI_TA:PartyLeader" => AttributeTag::PartyLeader,
    "TAGame.PRI_TA:PawnType" => AttributeTag::Byte,
    "TAGame.PRI_TA:PersistentCamera" => AttributeTag::ActiveActor,
    "TAGame.PRI_TA:PlayerHistoryKey" => AttributeTag::PlayerHistoryKey,
    "TAGame.PRI_TA:PlayerHistoryValid" => AttributeTag::Boolean,
    "TAGame.PRI_TA:PrimaryTitle" => AttributeTag::Title,
    "TAGame.PRI_TA:ReplicatedGameEvent" => AttributeTag::ActiveActor,
    "TAGame.PRI_TA:ReplicatedWorstNetQualityBeyondLatency" => AttributeTag::Byte,
    "TAGame.PRI_TA:RepStatTitles" => AttributeTag::RepStatTitle,
    "TAGame.PRI_TA:SecondaryTitle" => AttributeTag::Title,
    "TAGame.PRI_TA:SpectatorShortcut" => AttributeTag::Int,
    "TAGame.PRI_TA:SteeringSensitivity" => AttributeTag::Float,
    "TAGame.PRI_TA:TimeTillItem" => AttributeTag::Int,
    "TAGame.PRI_TA:Title" => AttributeTag::Int,
    "TAGame.PRI_TA:TotalXP" => AttributeTag::Int,
    "TAGame.RBActor_TA:bFrozen" => AttributeTag::Boolean,
    "TAGame.RBActor_TA:bIgnoreSyncing" => AttributeTag::Boolean,
    "TAGame.RBActor_TA:bReplayActor" => AttributeTag::Boolean,
    "TAGame.RBActor_TA:ReplicatedRBState" => AttributeTag::RigidBody,
    "TAGame.RBActor_TA:WeldedInfo" => AttributeTag::Welded,
    "TAGame.RumblePickups_TA:AttachedPickup" => AttributeTag::ActiveActor,
    "TAGame.RumblePickups_TA:ConcurrentItemCount" => AttributeTag::Int,
    "TAGame.RumblePickups_TA:PickupInfo" => AttributeTag::PickupInfo,
    "TAGame.SpecialPickup_BallFreeze_TA:RepOrigSpeed" => AttributeTag::Float,
    "TAGame.SpecialPickup_BallVelcro_TA:AttachTime" => AttributeTag::Float,
    "TAGame.SpecialPickup_BallVelcro_TA:bBroken" => AttributeTag::Boolean,
    "TAGame.SpecialPickup_BallVelcro_TA:bHit" => AttributeTag::Boolean,
    "TAGame.SpecialPickup_BallVelcro_TA:BreakTime" => AttributeTag::Float,
    "TAGame.SpecialPickup_Targeted_TA:Targeted" => AttributeTag::ActiveActor,
    "TAGame.Team_Soccar_TA:GameScore" => AttributeTag::Int,
    "TAGame.Team_TA:ClubColors" => AttributeTag::ClubColors,
    "TAGame.Team_TA:ClubID" => AttributeTag::Int64,
    "TAGame.Team_TA:CustomTeamName" => AttributeTag::String,
    "TAGame.Team_TA:Difficulty" => AttributeTag::Int,
    "TAGame.Team_TA:GameEvent" => AttributeTag::ActiveActor,
    "TAGame.Team_TA:LogoData" => AttributeTag::ActiveActor,
    "TAGame.Vehicle_TA:bDriving" => AttributeTag::Boolean,
    "TAGame.Vehicle_TA:bReplicatedHandbrake" => AttributeTag::Boolean,
    "TAGame.Vehicle_TA:ReplicatedSteer" => AttributeTag::Byte,
    "TAGame.Vehicle_TA:ReplicatedThrottle" => AttributeTag::Byte,
    "TAGame.VehiclePickup_TA:bNoPickup" => AttributeTag::Boolean,
    "TAGame.VehiclePickup_TA:NewReplicatedPickupData" => AttributeTag::PickupNew,
    "TAGame.VehiclePickup_TA:ReplicatedPickupData" => AttributeTag::Pickup,
    "TAGame.GameEvent_Soccar_TA:ReplicatedPrivateMatchSettings" => AttributeTag::PrivateMatchSettings,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_table_lookups() {
        let get = |name: &str| {
            SPAWN_TRAJECTORIES
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, spawn)| *spawn)
        };
        assert_eq!(
            get("Archetypes.Ball.Ball_Default"),
            Some(SpawnTrajectory::LocationAndRotation)
        );
        assert_eq!(
            get("Archetypes.CarComponents.CarComponent_Boost"),
            Some(SpawnTrajectory::Location)
        );
        assert_eq!(get("TAGame.Team_TA"), None);
    }

    #[test]
    fn class_hierarchy_is_rooted() {
        // every chain must bottom out instead of cycling
        for key in PARENT_CLASSES.keys() {
            let mut class: &str = key;
            let mut depth = 0;
            while let Some(parent) = PARENT_CLASSES.get(class) {
                class = parent;
                depth += 1;
                assert!(depth < 16, "cycle through {}", class);
            }
            assert_eq!(class, "Core.Object");
        }
    }

    #[test]
    fn object_parents_point_at_class_objects() {
        for parent in OBJECT_PARENTS.values() {
            let parent: &str = parent;
            assert!(
                PARENT_CLASSES.contains_key(parent),
                "parent {} is not a known class",
                parent
            );
        }
    }
}
