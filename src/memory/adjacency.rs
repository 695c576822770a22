use crate::Vertex;

/// Returns the capacity an adjacency array grows to once it is full.
#[inline]
fn grown_capacity(len: usize, hint: usize) -> usize {
    hint.max(len + len / 2 + 1)
}

/// Growable list of neighbours, each paired with the position of its reciprocal entry.
///
/// For undirected graphs the reciprocal entry lives in the neighbour's own [`AdjList`]; for
/// directed graphs outgoing entries point into the target's predecessor list and vice versa.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MirrorList {
    pub(crate) targets: Vec<Vertex>,
    pub(crate) mirror: Vec<usize>,
}

impl MirrorList {
    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Makes room for one more entry, growing by at least half the current length.
    fn reserve_one(&mut self, hint: usize) -> bool {
        let len = self.targets.len();
        if len < self.targets.capacity() {
            return false;
        }
        let additional = grown_capacity(len, hint) - len;
        self.targets.reserve_exact(additional);
        self.mirror.reserve_exact(additional);
        true
    }

    /// Appends an entry and returns its position.
    pub fn push(&mut self, target: Vertex, mirror: usize, hint: usize) -> usize {
        self.reserve_one(hint);
        self.targets.push(target);
        self.mirror.push(mirror);
        self.targets.len() - 1
    }

    /// Removes the entry at `pos` by moving the last entry into its place.
    pub fn swap_remove(&mut self, pos: usize) -> Vertex {
        self.mirror.swap_remove(pos);
        self.targets.swap_remove(pos)
    }
}

/// Outgoing adjacency array of one vertex together with its per-entry payload columns.
///
/// Weight and label columns are materialized on first write. All columns move together on
/// every push and removal.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AdjList<EL> {
    pub(crate) entries: MirrorList,
    weights: Option<Vec<f64>>,
    labels: Option<Vec<Option<EL>>>,
    data: Vec<Vec<f64>>,
}

impl<EL> AdjList<EL> {
    pub fn new(data_channels: usize, weighted: bool) -> Self {
        Self {
            entries: MirrorList::default(),
            weights: weighted.then(Vec::new),
            labels: None,
            data: (0..data_channels).map(|_| Vec::new()).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn target(&self, pos: usize) -> Vertex {
        self.entries.targets[pos]
    }

    #[inline]
    pub fn mirror(&self, pos: usize) -> usize {
        self.entries.mirror[pos]
    }

    #[inline]
    pub fn set_mirror(&mut self, pos: usize, mirror: usize) {
        self.entries.mirror[pos] = mirror;
    }

    #[inline]
    pub fn targets(&self) -> &[Vertex] {
        &self.entries.targets
    }

    /// Appends an entry with default payload and returns its position.
    ///
    /// `defaults` holds the initial value of every data channel.
    pub fn push(&mut self, target: Vertex, mirror: usize, hint: usize, defaults: &[f64]) -> usize {
        let grew = self.entries.reserve_one(hint);
        if grew {
            let additional = self.entries.targets.capacity() - self.len();
            if let Some(weights) = &mut self.weights {
                weights.reserve_exact(additional);
            }
            if let Some(labels) = &mut self.labels {
                labels.reserve_exact(additional);
            }
            for column in &mut self.data {
                column.reserve_exact(additional);
            }
        }

        let pos = self.entries.push(target, mirror, hint);
        if let Some(weights) = &mut self.weights {
            weights.push(1.0);
        }
        if let Some(labels) = &mut self.labels {
            labels.push(None);
        }
        for (column, &default) in self.data.iter_mut().zip(defaults) {
            column.push(default);
        }
        pos
    }

    /// Removes the entry at `pos` by moving the last entry, with its payload, into its place.
    pub fn swap_remove(&mut self, pos: usize) -> Vertex {
        if let Some(weights) = &mut self.weights {
            weights.swap_remove(pos);
        }
        if let Some(labels) = &mut self.labels {
            labels.swap_remove(pos);
        }
        for column in &mut self.data {
            column.swap_remove(pos);
        }
        self.entries.swap_remove(pos)
    }

    #[inline]
    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    pub fn weight(&self, pos: usize) -> f64 {
        self.weights.as_ref().map_or(1.0, |weights| weights[pos])
    }

    pub fn set_weight(&mut self, pos: usize, weight: f64) {
        let len = self.len();
        self.weights.get_or_insert_with(|| vec![1.0; len])[pos] = weight;
    }

    pub fn label(&self, pos: usize) -> Option<&EL> {
        self.labels.as_ref().and_then(|labels| labels[pos].as_ref())
    }

    pub fn set_label(&mut self, pos: usize, label: Option<EL>) {
        let len = self.len();
        self.labels
            .get_or_insert_with(|| (0..len).map(|_| None).collect())[pos] = label;
    }

    pub fn data(&self, pos: usize, channel: usize) -> f64 {
        self.data[channel][pos]
    }

    pub fn set_data(&mut self, pos: usize, channel: usize, value: f64) {
        self.data[channel][pos] = value;
    }

    /// Resets a data channel to `value` for every entry.
    pub fn fill_data(&mut self, channel: usize, value: f64) {
        self.data[channel].fill(value);
    }

    /// Clones the adjacency array, keeping only the selected payload columns.
    ///
    /// Data channels rejected by `keep_channel` are refilled from `defaults`.
    pub fn copy(
        &self,
        weights: bool,
        labels: bool,
        keep_channel: impl Fn(usize) -> bool,
        defaults: &[f64],
    ) -> Self
    where
        EL: Clone,
    {
        let len = self.len();
        let data = self
            .data
            .iter()
            .zip(defaults)
            .enumerate()
            .map(|(channel, (column, &default))| {
                if keep_channel(channel) {
                    column.clone()
                } else {
                    vec![default; len]
                }
            })
            .collect();
        Self {
            entries: self.entries.clone(),
            weights: if weights { self.weights.clone() } else { None },
            labels: if labels { self.labels.clone() } else { None },
            data,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn growth_follows_hint_then_geometric() {
        let mut list = AdjList::<()>::new(0, false);
        list.push(1, 0, 4, &[]);
        assert_eq!(list.entries.targets.capacity(), 4);
        for v in 2..=4 {
            list.push(v, 0, 4, &[]);
        }
        assert_eq!(list.entries.targets.capacity(), 4);
        list.push(5, 0, 4, &[]);
        assert_eq!(list.entries.targets.capacity(), 7);
    }

    #[test]
    fn swap_remove_moves_payload() {
        let mut list = AdjList::<&str>::new(1, false);
        for v in 0..3 {
            let pos = list.push(v, 10 + v as usize, 2, &[0.5]);
            list.set_weight(pos, v as f64);
            list.set_data(pos, 0, -(v as f64));
        }
        list.set_label(2, Some("last"));

        assert_eq!(list.swap_remove(0), 0);
        assert_eq!(list.targets(), &[2, 1]);
        assert_eq!(list.mirror(0), 12);
        assert_eq!(list.weight(0), 2.0);
        assert_eq!(list.label(0), Some(&"last"));
        assert_eq!(list.data(0, 0), -2.0);
        assert_eq!(list.label(1), None);
    }

    #[test]
    fn copy_drops_unselected_columns() {
        let mut list = AdjList::<u8>::new(2, false);
        let pos = list.push(3, 0, 1, &[0.0, 0.0]);
        list.set_weight(pos, 7.0);
        list.set_label(pos, Some(9));
        list.set_data(pos, 0, 2.0);
        list.set_data(pos, 1, 5.0);

        let copy = list.copy(false, true, |channel| channel == 1, &[4.0, 0.0]);
        assert_eq!(copy.weight(pos), 1.0);
        assert!(!copy.is_weighted());
        assert_eq!(copy.label(pos), Some(&9));
        assert_eq!(copy.data(pos, 0), 4.0);
        assert_eq!(copy.data(pos, 1), 5.0);
    }
}
