//! Forklifts: fetch the nearest parcel, carry it to the nearest truck with
//! room for it, repeat.
//!
//! # State machine
//!
//! ```text
//!          ┌── adjacent to parcel ──► Grabbing ──(next round)──┐
//!          │                                                    ▼
//!        Empty ◄──(next round)── Dropping ◄── adjacent to truck ── Loaded
//! ```
//!
//! Grabbing and dropping each take one round.  The round after the action
//! starts, the forklift completes it and then plays its new state's
//! behaviour within the same step.

use std::fmt;

use tracing::{debug, warn};
use wh_core::{ParcelId, TruckId, Vector};
use wh_spatial::{find_path_to_occupied, Board, Path, PathFinder};

use crate::{
    find_closest_parcel, find_closest_truck, ActionError, ActionResult, ForkliftAction, Parcel,
    RoundContext, Target,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForkliftStatus {
    #[default]
    Empty,
    Grabbing,
    Dropping,
    Loaded,
}

impl ForkliftStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ForkliftStatus::Empty    => "EMPTY",
            ForkliftStatus::Grabbing => "GRABBING",
            ForkliftStatus::Dropping => "DROPPING",
            ForkliftStatus::Loaded   => "LOADED",
        }
    }
}

impl fmt::Display for ForkliftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forklift {
    pub(crate) name:     String,
    pub(crate) position: Vector,
    pub(crate) status:   ForkliftStatus,
    pub(crate) carried:  Option<ParcelId>,
    pub(crate) target:   Option<Target>,
    pub(crate) path:     Option<Path>,
}

impl Forklift {
    pub const GLYPH: char = 'L';

    pub fn new(name: impl Into<String>, position: Vector) -> Self {
        Self {
            name: name.into(),
            position,
            status: ForkliftStatus::Empty,
            carried: None,
            target: None,
            path: None,
        }
    }

    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn position(&self) -> Vector { self.position }
    #[inline] pub fn status(&self) -> ForkliftStatus { self.status }
    #[inline] pub fn carried(&self) -> Option<ParcelId> { self.carried }
    #[inline] pub fn target(&self) -> Option<Target> { self.target }
    #[inline] pub fn path(&self) -> Option<&Path> { self.path.as_ref() }

    /// Plays one round.
    ///
    /// Failures (nothing to fetch, no route, no room) are logged and turn
    /// into [`ForkliftAction::Wait`]; the forklift retries next round.
    pub fn simulate_round<P>(&mut self, ctx: &mut RoundContext<'_, P>) -> ForkliftAction
    where
        P: PathFinder + ?Sized,
    {
        let finished = match self.status {
            ForkliftStatus::Grabbing => self.finish_grab(ctx),
            ForkliftStatus::Dropping => self.finish_drop(ctx),
            _ => Ok(()),
        };
        if let Err(err) = finished {
            warn!(round = ctx.round.0, forklift = %self.name, %err, "pending action failed");
            self.abandon_target(ctx);
            self.status = if self.carried.is_some() {
                ForkliftStatus::Loaded
            } else {
                ForkliftStatus::Empty
            };
        }

        let action = match self.status {
            ForkliftStatus::Empty  => self.seek_parcel(ctx),
            ForkliftStatus::Loaded => self.seek_truck(ctx),
            ForkliftStatus::Grabbing | ForkliftStatus::Dropping => ForkliftAction::Wait,
        };
        debug!(round = ctx.round.0, forklift = %self.name, %action, "forklift step");
        action
    }

    // ── Empty ─────────────────────────────────────────────────────────────

    fn seek_parcel<P>(&mut self, ctx: &mut RoundContext<'_, P>) -> ForkliftAction
    where
        P: PathFinder + ?Sized,
    {
        if !matches!(self.target, Some(Target::Parcel(_))) || self.needs_new_target(ctx) {
            self.abandon_target(ctx);
            if let Err(err) = self.acquire_parcel(ctx) {
                debug!(round = ctx.round.0, forklift = %self.name, %err, "no parcel to fetch");
                return ForkliftAction::Wait;
            }
        }
        let Some(Target::Parcel(parcel)) = self.target else {
            return ForkliftAction::Wait;
        };
        if self.remaining_steps() > 1 {
            return self.step(ctx);
        }
        match self.start_grab(ctx, parcel) {
            Ok(()) => ForkliftAction::Take(parcel),
            Err(err) => {
                warn!(round = ctx.round.0, forklift = %self.name, %err, "cannot grab parcel");
                self.abandon_target(ctx);
                ForkliftAction::Wait
            }
        }
    }

    fn acquire_parcel<P>(&mut self, ctx: &mut RoundContext<'_, P>) -> ActionResult<()>
    where
        P: PathFinder + ?Sized,
    {
        // Parcels no truck could ever hold are left alone.
        let largest = ctx.trucks.iter().map(|t| t.capacity()).max().unwrap_or(0);
        let id = find_closest_parcel(ctx.parcels, self.position, |p| {
            p.is_available() && p.weight() <= largest
        })
        .ok_or(ActionError::NoParcelAvailable)?;

        let parcel = ctx.parcels.get_mut(id.index()).ok_or(ActionError::InvalidTarget)?;
        let path = find_path_to_occupied(ctx.pathfinder, ctx.board, self.position, parcel.position())?;
        parcel.reserve()?;

        self.target = Some(Target::Parcel(id));
        self.path = Some(path);
        Ok(())
    }

    fn start_grab<P>(&mut self, ctx: &mut RoundContext<'_, P>, id: ParcelId) -> ActionResult<()>
    where
        P: PathFinder + ?Sized,
    {
        if self.carried.is_some() {
            return Err(ActionError::AlreadyLoaded);
        }
        ctx.parcels
            .get_mut(id.index())
            .ok_or(ActionError::InvalidTarget)?
            .pick_up()?;
        self.status = ForkliftStatus::Grabbing;
        Ok(())
    }

    fn finish_grab<P>(&mut self, ctx: &mut RoundContext<'_, P>) -> ActionResult<()>
    where
        P: PathFinder + ?Sized,
    {
        let Some(Target::Parcel(id)) = self.target else {
            return Err(ActionError::InvalidTarget);
        };
        let parcel = ctx.parcels.get_mut(id.index()).ok_or(ActionError::InvalidTarget)?;
        let floor = parcel.position;
        parcel.position = self.position;
        // Blocked until now, so nobody else can be standing on it.
        release_cell(ctx.board, floor);

        self.carried = Some(id);
        self.target = None;
        self.path = None;
        self.status = ForkliftStatus::Loaded;
        Ok(())
    }

    // ── Loaded ────────────────────────────────────────────────────────────

    fn seek_truck<P>(&mut self, ctx: &mut RoundContext<'_, P>) -> ForkliftAction
    where
        P: PathFinder + ?Sized,
    {
        if !matches!(self.target, Some(Target::Truck(_))) || self.needs_new_target(ctx) {
            self.abandon_target(ctx);
            if let Err(err) = self.acquire_truck(ctx) {
                debug!(round = ctx.round.0, forklift = %self.name, %err, "no truck to unload into");
                return ForkliftAction::Wait;
            }
        }
        let Some(Target::Truck(truck)) = self.target else {
            return ForkliftAction::Wait;
        };
        if self.remaining_steps() > 1 {
            return self.step(ctx);
        }
        match self.start_drop(ctx, truck) {
            Ok(parcel) => ForkliftAction::Leave(parcel),
            Err(err) => {
                debug!(round = ctx.round.0, forklift = %self.name, %err, "cannot unload");
                self.abandon_target(ctx);
                ForkliftAction::Wait
            }
        }
    }

    fn acquire_truck<P>(&mut self, ctx: &mut RoundContext<'_, P>) -> ActionResult<()>
    where
        P: PathFinder + ?Sized,
    {
        let weight = self.carried_weight(ctx.parcels)?;
        let id = find_closest_truck(ctx.trucks, self.position, |t| t.can_accept(weight))
            .ok_or(ActionError::NoTruckAvailable)?;

        let truck = ctx.trucks.get_mut(id.index()).ok_or(ActionError::InvalidTarget)?;
        let path = find_path_to_occupied(ctx.pathfinder, ctx.board, self.position, truck.position())?;
        truck.reserve(weight)?;

        self.target = Some(Target::Truck(id));
        self.path = Some(path);
        Ok(())
    }

    fn start_drop<P>(&mut self, ctx: &mut RoundContext<'_, P>, id: TruckId) -> ActionResult<ParcelId>
    where
        P: PathFinder + ?Sized,
    {
        let parcel = self.carried.ok_or(ActionError::NothingCarried)?;
        let weight = self.carried_weight(ctx.parcels)?;
        ctx.trucks
            .get(id.index())
            .ok_or(ActionError::InvalidTarget)?
            .check_drop(weight)?;
        self.status = ForkliftStatus::Dropping;
        Ok(parcel)
    }

    fn finish_drop<P>(&mut self, ctx: &mut RoundContext<'_, P>) -> ActionResult<()>
    where
        P: PathFinder + ?Sized,
    {
        let Some(Target::Truck(truck_id)) = self.target else {
            return Err(ActionError::InvalidTarget);
        };
        let parcel_id = self.carried.ok_or(ActionError::NothingCarried)?;
        let weight = self.carried_weight(ctx.parcels)?;

        let truck = ctx.trucks.get_mut(truck_id.index()).ok_or(ActionError::InvalidTarget)?;
        truck.deposit(weight)?;
        let dock = truck.position();

        let parcel = ctx.parcels.get_mut(parcel_id.index()).ok_or(ActionError::InvalidTarget)?;
        parcel.drop_off()?;
        parcel.position = dock;

        self.carried = None;
        self.target = None;
        self.path = None;
        self.status = ForkliftStatus::Empty;
        Ok(())
    }

    // ── Shared ────────────────────────────────────────────────────────────

    fn remaining_steps(&self) -> usize {
        self.path.as_ref().map_or(0, Path::len)
    }

    fn carried_weight(&self, parcels: &[Parcel]) -> ActionResult<u32> {
        let id = self.carried.ok_or(ActionError::NothingCarried)?;
        parcels
            .get(id.index())
            .map(Parcel::weight)
            .ok_or(ActionError::InvalidTarget)
    }

    /// The current target and route can no longer be followed.
    ///
    /// True with no target or route, when the target has become unavailable,
    /// or when the next cell is blocked and is not itself the goal.
    fn needs_new_target<P>(&self, ctx: &RoundContext<'_, P>) -> bool
    where
        P: PathFinder + ?Sized,
    {
        let (Some(target), Some(path)) = (self.target, self.path.as_ref()) else {
            return true;
        };
        if !target.is_available(ctx.parcels, ctx.trucks) {
            return true;
        }
        path.len() > 1 && path.head().is_some_and(|next| ctx.board.is_blocked(next))
    }

    /// Drops the current target, handing back whatever was reserved for it.
    fn abandon_target<P>(&mut self, ctx: &mut RoundContext<'_, P>)
    where
        P: PathFinder + ?Sized,
    {
        self.path = None;
        match self.target.take() {
            Some(Target::Parcel(id)) => {
                if let Some(parcel) = ctx.parcels.get_mut(id.index()) {
                    parcel.release();
                }
            }
            Some(Target::Truck(id)) => {
                let weight = self.carried_weight(ctx.parcels).unwrap_or(0);
                if let Some(truck) = ctx.trucks.get_mut(id.index()) {
                    truck.release(weight);
                }
            }
            None => {}
        }
    }

    /// Advances one cell along the route, moving any carried parcel along.
    fn step<P>(&mut self, ctx: &mut RoundContext<'_, P>) -> ForkliftAction
    where
        P: PathFinder + ?Sized,
    {
        let Some(next) = self.path.as_mut().and_then(Path::advance) else {
            return ForkliftAction::Wait;
        };
        release_cell(ctx.board, self.position);
        if let Err(err) = ctx.board.occupy(next, Self::GLYPH) {
            warn!(round = ctx.round.0, forklift = %self.name, %err, "moved off the board");
        }
        self.position = next;
        if let Some(parcel) = self.carried.and_then(|id| ctx.parcels.get_mut(id.index())) {
            parcel.position = next;
        }
        ForkliftAction::Go(next)
    }
}

fn release_cell(board: &mut Board, pos: Vector) {
    if let Err(err) = board.vacate(pos) {
        warn!(position = %pos, %err, "vacated cell is off the board");
    }
}
