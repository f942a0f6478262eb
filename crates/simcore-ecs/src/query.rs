//! Generic query construction: AND the active set with each requested
//! component's presence bitset, then drain the result in ascending
//! entity order.
//!
//! `QuerySpec` is implemented once per tuple arity, generic over the
//! world type, and reused by every schema `define_world!` produces —
//! the tuple impls are the only place "one AND per component" is
//! written down.

use crate::entity::EntityId;
use crate::world::{EcsWorld, HasComponent};
use simcore_bitset::BitsetLike;

/// A tuple of component types queryable against world `W`.
pub trait QuerySpec<W: EcsWorld> {
    /// Writes `active AND presence(T1) AND presence(T2) AND ...` into
    /// `out`. Never allocates: `W::Bits` is a fixed-size, `Copy`
    /// bitset, so `out` is always caller-owned stack storage.
    fn intersect(world: &W, out: &mut W::Bits);
}

/// Iterator over the entities matching a [`QuerySpec`], in ascending
/// id order. Drains an owned copy of the match bitset rather than
/// borrowing an iterator from it, since the match set is scratch data
/// nobody needs twice.
pub struct QueryIter<B> {
    remaining: B,
}

impl<B: BitsetLike> QueryIter<B> {
    fn new(matched: B) -> Self {
        QueryIter { remaining: matched }
    }
}

impl<B: BitsetLike> Iterator for QueryIter<B> {
    type Item = EntityId;

    #[inline]
    fn next(&mut self) -> Option<EntityId> {
        self.remaining.pop_lowest()
    }
}

/// Runs `Q` against `world` and returns an iterator over the matching
/// entities in ascending order.
///
/// Takes a local copy of the active set to intersect into rather than
/// borrowing `world.active()` and `world` simultaneously — `W::Bits`
/// is `Copy`, so this costs nothing, and it keeps the borrow on
/// `world` read-only for the whole call. That matters: queries run
/// from read-only contexts too (a renderer only ever sees `&World`),
/// so `query` cannot require `&mut W` to get scratch space.
pub fn query<W, Q>(world: &W) -> QueryIter<W::Bits>
where
    W: EcsWorld,
    Q: QuerySpec<W>,
{
    let mut scratch = *world.active();
    Q::intersect(world, &mut scratch);
    QueryIter::new(scratch)
}

macro_rules! impl_query_tuple {
    ($($t:ident),+) => {
        impl<W, $($t),+> QuerySpec<W> for ($($t,)+)
        where
            W: EcsWorld $(+ HasComponent<$t>)+,
            $($t: Copy,)+
        {
            fn intersect(world: &W, out: &mut W::Bits) {
                let mut acc = *world.active();
                $(
                    let snapshot = acc;
                    W::Bits::intersect_into(
                        &snapshot,
                        <W as HasComponent<$t>>::storage(world).presence(),
                        &mut acc,
                    );
                )+
                *out = acc;
            }
        }
    };
}

impl_query_tuple!(A);
impl_query_tuple!(A, B);
impl_query_tuple!(A, B, C);
impl_query_tuple!(A, B, C, D);
impl_query_tuple!(A, B, C, D, E);
impl_query_tuple!(A, B, C, D, E, F);
impl_query_tuple!(A, B, C, D, E, F, G);
impl_query_tuple!(A, B, C, D, E, F, G, H);
