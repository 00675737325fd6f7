use super::NodeId;
use crate::math::SpatialVector;
use crate::volume::Aabb;

/// Packed hierarchy produced by [`median_split`]: `n - 1` internal nodes
/// followed by `n` leaves, root at id `0`, internal volumes unioned bottom-up.
pub(crate) struct Built<V> {
    pub bounds: Vec<Aabb<V>>,
    pub children: Vec<(NodeId, NodeId)>,
    pub permutation: Vec<u32>,
}

struct Cursors {
    internal: usize,
    leaf: usize,
}

/// Builds a hierarchy by recursively splitting the leaves at the median of
/// the widest centroid axis.
pub(crate) fn median_split<V: SpatialVector>(leaves: &[Aabb<V>]) -> Built<V> {
    let count = leaves.len();
    if count == 0 {
        return Built {
            bounds: Vec::new(),
            children: Vec::new(),
            permutation: Vec::new(),
        };
    }

    let mut built = Built {
        bounds: vec![leaves[0]; 2 * count - 1],
        children: vec![(0, 0); count - 1],
        permutation: vec![0; count],
    };
    let mut items: Vec<(u32, Aabb<V>)> = leaves
        .iter()
        .enumerate()
        .map(|(index, &volume)| (index as u32, volume))
        .collect();
    let mut cursors = Cursors {
        internal: 0,
        leaf: 0,
    };

    split(&mut built, &mut items, &mut cursors);
    built
}

fn split<V: SpatialVector>(
    built: &mut Built<V>,
    items: &mut [(u32, Aabb<V>)],
    cursors: &mut Cursors,
) -> NodeId {
    let internal_count = built.children.len();

    if let [(index, volume)] = *items {
        let slot = cursors.leaf;
        cursors.leaf += 1;
        let id = (internal_count + slot) as NodeId;
        built.permutation[slot] = index;
        built.bounds[id as usize] = volume;
        return id;
    }

    let id = cursors.internal as NodeId;
    cursors.internal += 1;

    // Widest axis of the centroid extents.
    let mut lo = items[0].1.center();
    let mut hi = lo;
    for (_, volume) in items.iter() {
        let center = volume.center();
        lo = lo.min_by_component(center);
        hi = hi.max_by_component(center);
    }
    let extent = hi - lo;
    let mut axis = 0;
    for candidate in 1..V::DIM {
        if extent.component(candidate) > extent.component(axis) {
            axis = candidate;
        }
    }

    let middle = items.len() / 2;
    items.select_nth_unstable_by(middle, |a, b| {
        let ca = a.1.center().component(axis);
        let cb = b.1.center().component(axis);
        match ca.partial_cmp(&cb) {
            Some(ordering) => ordering,
            None => std::cmp::Ordering::Equal,
        }
    });

    let (front, back) = items.split_at_mut(middle);
    let left = split(built, front, cursors);
    let right = split(built, back, cursors);

    built.children[id as usize] = (left, right);
    built.bounds[id as usize] = built.bounds[left as usize].union(built.bounds[right as usize]);
    id
}
