//! Lexical scopes with explicit reference counts.
//!
//! Scopes live in a [`ScopeArena`] and are addressed by generational
//! [`ScopeId`]s. Each scope keeps its bindings in declaration order and a
//! cap on how many of its outer scope's bindings it may see, which is how a
//! closure is kept from seeing names declared after it was created.
//!
//! # Reference holds
//!
//! A scope's count is the number of live holds on it:
//! - the block executing in it (one, from [`ScopeArena::create`]);
//! - each child scope whose `outer` it is;
//! - each slot in *another* scope that stores a closure defined here;
//! - each function value in flight (returned by [`ScopeArena::lookup`] or
//!   [`ScopeArena::make_closure`]) until it is stored with
//!   [`ScopeArena::assign`] or dropped with [`ScopeArena::discard`].
//!
//! A closure stored in its own defining scope holds nothing, so defining a
//! function never makes its scope keep itself alive.
//!
//! # Groups held only by each other
//!
//! A scope can still be kept alive by a closure it stores whose defining
//! scope is one of its descendants: the slot holds the descendant and the
//! descendant holds the scope through its outer chain. Once a scope's block
//! has exited ([`ScopeArena::exit`]), any release that leaves it with a
//! nonzero count makes it a suspect. Suspects are checked by counting, for
//! every closed scope reachable from them, the holds that come from inside
//! that group; scopes whose whole count is accounted for that way, and that
//! no externally held scope reaches, are destroyed together.

use std::fmt;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};
use zitp_ir::{FunctionId, Name};

use crate::value::{Closure, Value};

/// Handle to a scope in a [`ScopeArena`].
///
/// The generation changes every time a slot is reused, so a handle to a
/// reclaimed scope never resolves to its successor.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ScopeId {
    index: u32,
    generation: u32,
}

impl ScopeId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        ScopeId { index, generation }
    }

    pub const fn index(self) -> u32 {
        self.index
    }

    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({self})")
    }
}

/// Scope operation failure.
///
/// `Unbound` is an ordinary program error; `Invariant` means the holds were
/// unbalanced and the interpreter itself is at fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeError {
    Unbound(Name),
    Invariant(String),
}

/// Lifetime counters, for auditing that every scope created was reclaimed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeStats {
    pub created: u64,
    pub destroyed: u64,
    pub live: u64,
    pub peak_live: u64,
}

/// What a collapse reclaimed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Collapse {
    /// Scopes destroyed by the cascade.
    pub scopes: usize,
    /// How many of those were call frames.
    pub call_frames: usize,
}

#[derive(Clone, Debug)]
struct Binding {
    name: Name,
    value: Value,
}

struct Scope {
    bindings: SmallVec<[Binding; 4]>,
    outer: Option<ScopeId>,
    /// How many of `outer`'s own bindings are visible from here.
    outer_visible: usize,
    refs: u32,
    call_frame: bool,
    /// A block is still executing in this scope.
    open: bool,
}

impl Scope {
    /// Scopes this one holds a reference on: its outer scope, then the
    /// defining scope of every closure stored here that was defined elsewhere.
    fn holds(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        self.outer
            .into_iter()
            .chain(self.bindings.iter().filter_map(move |b| match &b.value {
                Value::Function(closure) if closure.scope != id => Some(closure.scope),
                _ => None,
            }))
    }
}

struct Entry {
    generation: u32,
    scope: Option<Scope>,
}

/// Owner of every scope in a run.
#[derive(Default)]
pub struct ScopeArena {
    entries: Vec<Entry>,
    free: Vec<u32>,
    stats: ScopeStats,
}

type ScopeResult<T> = Result<T, ScopeError>;

fn invariant(detail: String) -> ScopeError {
    ScopeError::Invariant(detail)
}

impl ScopeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> ScopeStats {
        self.stats
    }

    /// Whether `id` still names a live scope.
    pub fn is_live(&self, id: ScopeId) -> bool {
        self.get(id).is_ok()
    }

    /// Current reference count of a live scope.
    pub fn refs(&self, id: ScopeId) -> Option<u32> {
        self.get(id).ok().map(|s| s.refs)
    }

    fn get(&self, id: ScopeId) -> ScopeResult<&Scope> {
        self.entries
            .get(id.index as usize)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.scope.as_ref())
            .ok_or_else(|| invariant(format!("scope {id} is not live")))
    }

    fn get_mut(&mut self, id: ScopeId) -> ScopeResult<&mut Scope> {
        self.entries
            .get_mut(id.index as usize)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.scope.as_mut())
            .ok_or_else(|| invariant(format!("scope {id} is not live")))
    }

    /// Allocate a scope holding one reference for the caller.
    ///
    /// `outer_visible` caps how many of `outer`'s bindings are reachable;
    /// pass [`ScopeArena::snapshot_visibility`] of `outer` for a block nested
    /// inside it, or the closure's `visible` for a call frame.
    pub fn create(
        &mut self,
        outer: Option<ScopeId>,
        outer_visible: usize,
        call_frame: bool,
    ) -> ScopeResult<ScopeId> {
        if let Some(outer) = outer {
            self.retain(outer)?;
        }
        let scope = Scope {
            bindings: SmallVec::new(),
            outer,
            outer_visible,
            refs: 1,
            call_frame,
            open: true,
        };

        let id = if let Some(index) = self.free.pop() {
            let entry = self
                .entries
                .get_mut(index as usize)
                .ok_or_else(|| invariant(format!("free slot {index} out of range")))?;
            entry.scope = Some(scope);
            ScopeId::new(index, entry.generation)
        } else {
            let index = u32::try_from(self.entries.len())
                .map_err(|_| invariant("scope arena exhausted".to_string()))?;
            self.entries.push(Entry {
                generation: 0,
                scope: Some(scope),
            });
            ScopeId::new(index, 0)
        };

        self.stats.created = self.stats.created.saturating_add(1);
        self.stats.live = self.stats.live.saturating_add(1);
        self.stats.peak_live = self.stats.peak_live.max(self.stats.live);
        match outer {
            Some(outer) => trace!(scope = %id, outer = %outer, outer_visible, call_frame, "link"),
            None => trace!(scope = %id, call_frame, "link root"),
        }
        Ok(id)
    }

    /// Add one reference to a live scope.
    pub fn retain(&mut self, id: ScopeId) -> ScopeResult<()> {
        let scope = self.get_mut(id)?;
        scope.refs = scope
            .refs
            .checked_add(1)
            .ok_or_else(|| invariant(format!("reference count overflow on {id}")))?;
        Ok(())
    }

    /// Append `name` to the scope's own bindings as Integer 0, unless the
    /// scope already declares it.
    pub fn declare(&mut self, id: ScopeId, name: Name) -> ScopeResult<()> {
        let scope = self.get_mut(id)?;
        if !scope.bindings.iter().any(|b| b.name == name) {
            scope.bindings.push(Binding {
                name,
                value: Value::Int(0),
            });
        }
        Ok(())
    }

    /// Number of the scope's own bindings right now.
    ///
    /// Frozen into a closure or child scope, this becomes the visibility
    /// cap at this level; the caps recorded further out were frozen earlier,
    /// so together they describe exactly the chain visible at this moment.
    pub fn snapshot_visibility(&self, id: ScopeId) -> ScopeResult<usize> {
        Ok(self.get(id)?.bindings.len())
    }

    /// Find the slot for `name`: the owning scope and the binding's index.
    fn resolve(&self, start: ScopeId, name: Name) -> ScopeResult<(ScopeId, usize)> {
        let mut current = start;
        let mut cap = usize::MAX;
        loop {
            let scope = self.get(current)?;
            let visible = cap.min(scope.bindings.len());
            let found = scope
                .bindings
                .get(..visible)
                .and_then(|bindings| bindings.iter().position(|b| b.name == name));
            if let Some(index) = found {
                return Ok((current, index));
            }
            match scope.outer {
                Some(outer) => {
                    cap = scope.outer_visible;
                    current = outer;
                }
                None => return Err(ScopeError::Unbound(name)),
            }
        }
    }

    /// Look up `name` from `scope` outward.
    ///
    /// A function value comes back holding one reference on its defining
    /// scope; store it with [`assign`](Self::assign) or drop it with
    /// [`discard`](Self::discard).
    pub fn lookup(&mut self, scope: ScopeId, name: Name) -> ScopeResult<Value> {
        let (owner, index) = self.resolve(scope, name)?;
        let value = self
            .get(owner)?
            .bindings
            .get(index)
            .map(|b| b.value.clone())
            .ok_or_else(|| invariant(format!("binding {index} vanished from {owner}")))?;
        if let Value::Function(closure) = &value {
            self.retain(closure.scope)?;
        }
        Ok(value)
    }

    /// Create a function value over `scope`, seeing every binding it has now.
    ///
    /// The value is in flight: it holds one reference on `scope`.
    pub fn make_closure(&mut self, scope: ScopeId, function: FunctionId) -> ScopeResult<Value> {
        let visible = self.snapshot_visibility(scope)?;
        self.retain(scope)?;
        Ok(Value::Function(Rc::new(Closure::new(
            function, scope, visible,
        ))))
    }

    /// Store `value` into the visible slot for `name`.
    ///
    /// Consumes the in-flight hold of a function value: it moves into the
    /// slot, or is released when the slot belongs to the function's own
    /// defining scope. A function value being overwritten loses one use and
    /// its slot's hold; if that was its last use, the release runs as a
    /// [`collapse`](Self::collapse).
    pub fn assign(&mut self, scope: ScopeId, name: Name, value: Value) -> ScopeResult<()> {
        let (owner, index) = self.resolve(scope, name)?;

        if let Value::Function(closure) = &value {
            closure.add_use();
            if closure.scope == owner {
                self.release(owner)?;
            }
        }

        let slot = self
            .get_mut(owner)?
            .bindings
            .get_mut(index)
            .ok_or_else(|| invariant(format!("binding {index} vanished from {owner}")))?;
        let old = std::mem::replace(&mut slot.value, value);

        if let Value::Function(closure) = old {
            let remaining = closure.drop_use();
            if closure.scope != owner {
                if remaining == 0 {
                    self.collapse(closure.scope)?;
                } else {
                    self.release(closure.scope)?;
                }
            }
        }
        Ok(())
    }

    /// Drop a value without storing it, releasing a function's in-flight hold.
    pub fn discard(&mut self, value: Value) -> ScopeResult<()> {
        if let Value::Function(closure) = value {
            self.release(closure.scope)?;
        }
        Ok(())
    }

    /// Drop one reference; at zero the scope is destroyed, which drops its
    /// bindings' holds and its reference on the outer scope in turn.
    ///
    /// A closed scope left with a nonzero count is checked for being held
    /// only by scopes it keeps alive itself; such a group goes too.
    ///
    /// Returns what the cascade destroyed.
    pub fn release(&mut self, id: ScopeId) -> ScopeResult<Collapse> {
        let mut pending: SmallVec<[ScopeId; 8]> = smallvec![id];
        let mut suspects: SmallVec<[ScopeId; 4]> = SmallVec::new();
        let mut reclaimed = Collapse::default();

        loop {
            while let Some(id) = pending.pop() {
                let scope = self.get_mut(id)?;
                scope.refs = scope
                    .refs
                    .checked_sub(1)
                    .ok_or_else(|| invariant(format!("release of {id} with no references")))?;
                trace!(scope = %id, refs = scope.refs, "unlink");
                if scope.refs > 0 {
                    if !scope.open {
                        suspects.push(id);
                    }
                    continue;
                }
                let held = self.destroy(id, &mut reclaimed)?;
                pending.extend(held);
            }

            if suspects.is_empty() {
                break;
            }
            let group = self.unreachable_group(&suspects)?;
            suspects.clear();
            if group.is_empty() {
                break;
            }
            debug!(scopes = group.len(), "reclaiming scopes held only by each other");
            let doomed: FxHashSet<ScopeId> = group.iter().copied().collect();
            for id in group {
                let held = self.destroy(id, &mut reclaimed)?;
                pending.extend(held.into_iter().filter(|target| !doomed.contains(target)));
            }
        }
        Ok(reclaimed)
    }

    /// Release the hold of the block executing in `id` and mark it closed.
    ///
    /// From here on, only closures and child scopes keep it alive.
    pub fn exit(&mut self, id: ScopeId) -> ScopeResult<Collapse> {
        self.get_mut(id)?.open = false;
        self.release(id)
    }

    /// Release the hold a dead closure's slot had on its defining scope.
    ///
    /// Same cascade as [`release`](Self::release): every loop or branch
    /// scope that only that closure kept alive goes with it. The cascade
    /// stops at the first scope something else still holds, which is at
    /// the latest the call frame whose block is running, so a call frame
    /// is reclaimed only once nothing can reach it.
    pub fn collapse(&mut self, captured: ScopeId) -> ScopeResult<Collapse> {
        let reclaimed = self.release(captured)?;
        if reclaimed.scopes > 0 {
            debug!(
                scope = %captured,
                scopes = reclaimed.scopes,
                call_frames = reclaimed.call_frames,
                "collapsed dead closure scope chain"
            );
        }
        Ok(reclaimed)
    }

    /// Destroy a scope whose holds are being accounted for by the caller.
    ///
    /// Returns the scopes it held, each of which is owed one release.
    fn destroy(
        &mut self,
        id: ScopeId,
        reclaimed: &mut Collapse,
    ) -> ScopeResult<SmallVec<[ScopeId; 4]>> {
        let scope = self.reclaim(id)?;
        reclaimed.scopes = reclaimed.scopes.saturating_add(1);
        if scope.call_frame {
            reclaimed.call_frames = reclaimed.call_frames.saturating_add(1);
        }
        let held = scope.holds(id).collect();
        for binding in scope.bindings {
            if let Value::Function(closure) = binding.value {
                closure.drop_use();
            }
        }
        Ok(held)
    }

    /// Closed scopes reachable from `suspects` that are held only from
    /// inside their own group.
    fn unreachable_group(&self, suspects: &[ScopeId]) -> ScopeResult<Vec<ScopeId>> {
        let mut members: Vec<ScopeId> = Vec::new();
        let mut position: FxHashMap<ScopeId, usize> = FxHashMap::default();
        let mut stack: Vec<ScopeId> = suspects
            .iter()
            .copied()
            .filter(|&id| self.is_live(id))
            .collect();
        while let Some(id) = stack.pop() {
            if position.contains_key(&id) {
                continue;
            }
            let scope = self.get(id)?;
            if scope.open {
                continue;
            }
            position.insert(id, members.len());
            members.push(id);
            stack.extend(scope.holds(id));
        }

        let mut internal = vec![0u32; members.len()];
        for &id in &members {
            for target in self.get(id)?.holds(id) {
                if let Some(&i) = position.get(&target) {
                    internal[i] = internal[i].saturating_add(1);
                }
            }
        }

        // Anything held from outside the group is alive, and so is
        // everything it holds.
        let mut alive = vec![false; members.len()];
        let mut stack: Vec<usize> = Vec::new();
        for (i, &id) in members.iter().enumerate() {
            if self.get(id)?.refs > internal[i] {
                stack.push(i);
            }
        }
        while let Some(i) = stack.pop() {
            if alive[i] {
                continue;
            }
            alive[i] = true;
            for target in self.get(members[i])?.holds(members[i]) {
                if let Some(&j) = position.get(&target) {
                    if !alive[j] {
                        stack.push(j);
                    }
                }
            }
        }

        Ok(members
            .into_iter()
            .zip(alive)
            .filter_map(|(id, alive)| (!alive).then_some(id))
            .collect())
    }

    /// Remove a scope from its slot and bump the slot's generation.
    fn reclaim(&mut self, id: ScopeId) -> ScopeResult<Scope> {
        let entry = self
            .entries
            .get_mut(id.index as usize)
            .filter(|e| e.generation == id.generation)
            .ok_or_else(|| invariant(format!("scope {id} is not live")))?;
        let scope = entry
            .scope
            .take()
            .ok_or_else(|| invariant(format!("scope {id} is not live")))?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(id.index);
        self.stats.destroyed = self.stats.destroyed.saturating_add(1);
        self.stats.live = self.stats.live.saturating_sub(1);
        trace!(scope = %id, "destroy");
        Ok(scope)
    }

    /// Reclaim every scope still alive, regardless of its count.
    ///
    /// After a completed run nothing should be left: groups held only by
    /// each other are reclaimed when their last block exits. Scopes whose
    /// blocks never exited through [`exit`](Self::exit) are swept here.
    /// Returns how many scopes were left.
    pub fn teardown(&mut self) -> usize {
        let mut leaked = 0usize;
        for index in 0..self.entries.len() {
            let Some(entry) = self.entries.get_mut(index) else {
                continue;
            };
            let Some(scope) = entry.scope.take() else {
                continue;
            };
            entry.generation = entry.generation.wrapping_add(1);
            for binding in &scope.bindings {
                if let Value::Function(closure) = &binding.value {
                    closure.drop_use();
                }
            }
            if let Ok(index) = u32::try_from(index) {
                self.free.push(index);
            }
            self.stats.destroyed = self.stats.destroyed.saturating_add(1);
            self.stats.live = self.stats.live.saturating_sub(1);
            leaked = leaked.saturating_add(1);
        }
        if leaked > 0 {
            debug!(leaked, "swept scopes left alive at teardown");
        }
        leaked
    }
}
