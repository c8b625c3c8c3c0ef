use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, IteratorRandom};
use rand::{Rng, SeedableRng};

/// Builds the random source used by a generation run.
///
/// - `Some(seed)`: deterministic source, identical seeds give identical runs
/// - `None`: source seeded from the thread-local entropy generator
pub fn make_rng(seed: Option<u64>) -> StdRng {
	match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_rng(&mut rand::rng()),
	}
}

/// Picks one element of `items`, each position with the same probability.
///
/// Duplicated values are distinct positions, so a value present twice is
/// twice as likely to be drawn.
///
/// Returns `None` if `items` is empty.
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
	items.choose(rng)
}

/// Picks one item of an iterator, each item with the same probability.
pub fn pick_from<I, R>(items: I, rng: &mut R) -> Option<I::Item>
where
	I: IntoIterator,
	R: Rng + ?Sized,
{
	items.into_iter().choose(rng)
}
