use ahash::AHashMap;

const CHUNK_SIZE: usize = 4096;
const DIV_SHIFT: usize = 12;

// A growable list optimized for appending, stored as fixed-size chunks so indices stay
// stable under growth and no reallocation ever copies elements.
pub(crate) struct ChunkArray<T> {
    chunks: Vec<Vec<T>>,
    count: usize,
}

impl<T> ChunkArray<T> {
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            chunks: Vec::with_capacity(initial_capacity.max(1).div_ceil(CHUNK_SIZE)),
            count: 0,
        }
    }

    pub fn push(&mut self, value: T) -> usize {
        let row = self.count >> DIV_SHIFT;
        if row == self.chunks.len() {
            self.chunks.push(Vec::with_capacity(CHUNK_SIZE));
        }
        let col = self.count & (CHUNK_SIZE - 1);
        let chunk = &mut self.chunks[row];
        if col < chunk.len() {
            // slot left over from a previous clear()
            chunk[col] = value;
        } else {
            chunk.push(value);
        }
        self.count += 1;
        self.count - 1
    }

    pub fn get(&self, index: usize) -> &T {
        &self.chunks[index >> DIV_SHIFT][index & (CHUNK_SIZE - 1)]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    // Resets the count without freeing chunks.
    pub fn clear(&mut self) {
        self.count = 0;
    }
}

struct Node {
    suggestion: Box<str>,
    next: Option<u32>,
}

struct Entry {
    count: usize,
    first: Option<u32>,
}

/// Temporarily stages dictionary data during the adding of many words, deferring the
/// construction of the permanent delete buckets to a single commit pass.
///
/// Each delete hash maps to a linked list of suggestion nodes held in a chunked arena;
/// `next` pointers are arena indices, so staging a million entries costs one map entry
/// plus one arena slot each, with no per-node allocation.
pub struct SuggestionStage {
    deletes: AHashMap<u32, Entry>,
    nodes: ChunkArray<Node>,
}

impl SuggestionStage {
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            deletes: AHashMap::with_capacity(initial_capacity),
            nodes: ChunkArray::new(initial_capacity * 2),
        }
    }

    /// Number of unique staged delete hashes.
    pub fn delete_count(&self) -> usize {
        self.deletes.len()
    }

    /// Total number of staged suggestions across all deletes.
    pub fn node_count(&self) -> usize {
        self.nodes.count()
    }

    /// Drops all staged data, keeping the arena chunks for reuse.
    pub fn clear(&mut self) {
        self.deletes.clear();
        self.nodes.clear();
    }

    // Prepends a suggestion to the staged list for a delete hash.
    pub(crate) fn add(&mut self, delete_hash: u32, suggestion: &str) {
        let next_index = self.nodes.count() as u32;
        let entry = self.deletes.entry(delete_hash).or_insert(Entry {
            count: 0,
            first: None,
        });
        let next = entry.first;
        entry.count += 1;
        entry.first = Some(next_index);
        self.nodes.push(Node {
            suggestion: Box::from(suggestion),
            next,
        });
    }

    // Merges all staged lists into the permanent delete buckets. Walks each per-hash
    // chain once; the duplicate guard keeps buckets set-like when the same term was
    // staged twice for one hash or already committed earlier.
    pub(crate) fn commit_to(self, permanent_deletes: &mut AHashMap<u32, Vec<Box<str>>>) {
        let SuggestionStage { deletes, nodes } = self;
        for (delete_hash, entry) in deletes {
            let bucket = permanent_deletes
                .entry(delete_hash)
                .or_insert_with(|| Vec::with_capacity(entry.count));
            let mut next = entry.first;
            while let Some(index) = next {
                let node = nodes.get(index as usize);
                if !bucket.iter().any(|term| **term == *node.suggestion) {
                    bucket.push(node.suggestion.clone());
                }
                next = node.next;
            }
        }
    }
}
