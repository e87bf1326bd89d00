use crate::types::{ArgSpec, ArgType, Genome, InputSpec, Value};
use rand::seq::index;
use rand::Rng;

/// Letters, digits, punctuation and space
pub const STRING_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ ";

const INT_DELTA: i64 = 5;
/// Perturbation for ints whose descriptor tag disagrees with the value
const UNTYPED_INT_DELTA: i64 = 3;

/// Tournament selection: best of `tournament_size` distinct random candidates.
/// Ties go to the first maximal candidate drawn.
///
/// # Panics
///
/// Panics if `fitnesses` is empty.
pub fn tournament_index<R: Rng + ?Sized>(
    fitnesses: &[f64],
    tournament_size: usize,
    rng: &mut R,
) -> usize {
    assert!(!fitnesses.is_empty(), "tournament over an empty population");
    let amount = tournament_size.clamp(1, fitnesses.len());
    let mut best: Option<usize> = None;
    for idx in index::sample(rng, fitnesses.len(), amount).iter() {
        match best {
            Some(b) if fitnesses[idx] <= fitnesses[b] => {}
            _ => best = Some(idx),
        }
    }
    best.unwrap_or(0)
}

pub fn tournament_selection<'a, R: Rng + ?Sized>(
    population: &'a [Genome],
    fitnesses: &[f64],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Genome {
    &population[tournament_index(fitnesses, tournament_size, rng)]
}

fn pick<R: Rng + ?Sized>(a: &Value, b: &Value, rng: &mut R) -> Value {
    if rng.gen_bool(0.5) {
        a.clone()
    } else {
        b.clone()
    }
}

/// Single-point split of two sequences; `None` when either is shorter than 2
fn split_point<R: Rng + ?Sized>(len1: usize, len2: usize, rng: &mut R) -> Option<usize> {
    let len = len1.min(len2);
    (len >= 2).then(|| rng.gen_range(1..len))
}

fn splice<T: Clone>(head: &[T], tail: &[T], point: usize) -> Vec<T> {
    head[..point].iter().chain(&tail[point..]).cloned().collect()
}

fn recombine_arg<R: Rng + ?Sized>(
    a: &Value,
    b: &Value,
    arg_spec: Option<&ArgSpec>,
    rng: &mut R,
) -> (Value, Value) {
    match (arg_spec.map(|s| s.arg_type), a, b) {
        (Some(ArgType::IntList), Value::IntList(x), Value::IntList(y)) => {
            if let Some(point) = split_point(x.len(), y.len(), rng) {
                return (
                    Value::IntList(splice(x, y, point)),
                    Value::IntList(splice(y, x, point)),
                );
            }
        }
        (Some(ArgType::Str), Value::Str(x), Value::Str(y)) => {
            let x: Vec<char> = x.chars().collect();
            let y: Vec<char> = y.chars().collect();
            if let Some(point) = split_point(x.len(), y.len(), rng) {
                return (
                    Value::Str(splice(&x, &y, point).into_iter().collect()),
                    Value::Str(splice(&y, &x, point).into_iter().collect()),
                );
            }
        }
        _ => {}
    }
    (pick(a, b, rng), pick(a, b, rng))
}

/// Spec-aware crossover. With probability `1 - rate` the parents come back
/// unchanged. Same-arity genomes recombine argument by argument; anything
/// else gets a single whole-genome split.
pub fn crossover<R: Rng + ?Sized>(
    parent1: &Genome,
    parent2: &Genome,
    spec: Option<&InputSpec>,
    rate: f64,
    rng: &mut R,
) -> (Genome, Genome) {
    if rng.gen::<f64>() >= rate {
        return (parent1.clone(), parent2.clone());
    }

    match spec {
        Some(spec) if parent1.len() == parent2.len() => parent1
            .iter()
            .zip(parent2)
            .enumerate()
            .map(|(idx, (a, b))| recombine_arg(a, b, spec.get(idx), rng))
            .unzip(),
        _ => match split_point(parent1.len(), parent2.len(), rng) {
            Some(point) => (
                splice(parent1, parent2, point),
                splice(parent2, parent1, point),
            ),
            None => (parent1.clone(), parent2.clone()),
        },
    }
}

fn nudge<R: Rng + ?Sized>(value: i64, lo: i64, hi: i64, rng: &mut R) -> i64 {
    value
        .saturating_add(rng.gen_range(-INT_DELTA..=INT_DELTA))
        .clamp(lo, hi)
}

fn mutate_int_list<R: Rng + ?Sized>(items: &mut Vec<i64>, arg_spec: &ArgSpec, rng: &mut R) {
    let (lo, hi) = arg_spec.value_bounds();
    let (len_lo, len_hi) = arg_spec.length_bounds(items.len());

    if !items.is_empty() && rng.gen_bool(0.5) {
        let idx = rng.gen_range(0..items.len());
        items[idx] = nudge(items[idx], lo, hi, rng);
    } else if items.len() < len_hi && rng.gen_bool(0.5) {
        items.push(rng.gen_range(lo..=hi));
    } else if items.len() > len_lo {
        let idx = rng.gen_range(0..items.len());
        items.remove(idx);
    }
}

fn mutate_str<R: Rng + ?Sized>(value: &mut String, arg_spec: &ArgSpec, rng: &mut R) {
    let mut chars: Vec<char> = value.chars().collect();
    let (len_lo, len_hi) = arg_spec.length_bounds(chars.len());
    let alphabet: Vec<char> = STRING_ALPHABET.chars().collect();
    let random_char = |rng: &mut R| alphabet[rng.gen_range(0..alphabet.len())];

    match rng.gen_range(0..3) {
        0 if !chars.is_empty() => {
            let idx = rng.gen_range(0..chars.len());
            chars[idx] = random_char(rng);
        }
        1 if chars.len() < len_hi => {
            let idx = rng.gen_range(0..=chars.len());
            let c = random_char(rng);
            chars.insert(idx, c);
        }
        2 if chars.len() > len_lo => {
            let idx = rng.gen_range(0..chars.len());
            chars.remove(idx);
        }
        _ => return,
    }
    *value = chars.into_iter().collect();
}

/// With probability `rate`, perturb one uniformly chosen argument within its bounds
pub fn mutate<R: Rng + ?Sized>(
    genome: &mut Genome,
    spec: Option<&InputSpec>,
    rate: f64,
    rng: &mut R,
) {
    if rng.gen::<f64>() >= rate {
        return;
    }
    let Some(spec) = spec.filter(|s| s.arity() == genome.len() && !genome.is_empty()) else {
        return;
    };

    let idx = rng.gen_range(0..genome.len());
    let arg_spec = &spec.args[idx];
    match (arg_spec.arg_type, &mut genome[idx]) {
        (ArgType::Int, Value::Int(v)) => {
            let (lo, hi) = arg_spec.value_bounds();
            *v = nudge(*v, lo, hi, rng);
        }
        (ArgType::IntList, Value::IntList(items)) => mutate_int_list(items, arg_spec, rng),
        (ArgType::Str, Value::Str(s)) => mutate_str(s, arg_spec, rng),
        (_, Value::Int(v)) => {
            *v = v.saturating_add(rng.gen_range(-UNTYPED_INT_DELTA..=UNTYPED_INT_DELTA));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_alphabet_is_printable_ascii() {
        assert_eq!(STRING_ALPHABET.len(), 26 * 2 + 10 + 32 + 1);
        assert!(STRING_ALPHABET.chars().all(|c| c.is_ascii() && !c.is_ascii_control()));
    }

    #[test]
    fn test_split_point_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(split_point(1, 5, &mut rng), None);
        for _ in 0..200 {
            let p = split_point(4, 6, &mut rng).unwrap();
            assert!((1..=3).contains(&p));
        }
    }

    #[test]
    fn test_tournament_size_larger_than_population() {
        let mut rng = StdRng::seed_from_u64(3);
        let idx = tournament_index(&[0.1, 0.9], 10, &mut rng);
        assert_eq!(idx, 1);
    }

    #[test]
    #[should_panic(expected = "empty population")]
    fn test_tournament_over_empty_population_panics() {
        let mut rng = StdRng::seed_from_u64(3);
        tournament_index(&[], 3, &mut rng);
    }

    #[test]
    fn test_mismatched_tag_int_is_nudged() {
        let spec = InputSpec::new(vec![ArgSpec::string("s", 1, 3)]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut genome = vec![Value::Int(100)];
        mutate(&mut genome, Some(&spec), 1.0, &mut rng);
        let v = genome[0].as_int().unwrap();
        assert!((97..=103).contains(&v));
    }
}
