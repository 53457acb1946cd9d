//! Composition of transformations into flat, simplified chains
//!
//! Chains are kept right-nested with atomic steps only:
//! `Concatenated(a, Concatenated(b, c))`. Joining two chains walks the
//! left chain from its end and merges each step into the head of what
//! follows, so neighbouring steps get a chance to cancel or collapse.

use log::trace;

use super::Transformation;

/// Outcome of trying to merge two neighbouring atomic steps
enum Merge {
    /// The pair reduced to at most one step
    Merged(Option<Transformation>),
    /// Nothing to simplify
    Kept(Transformation, Transformation),
}

/// Compose two optional steps; `None` stands for the identity
///
/// Identity steps vanish, exact inverses cancel out, neighbouring matrices
/// are multiplied into one (`second · first`) and nested chains are
/// flattened.
pub fn concatenate(first: Option<Transformation>, second: Option<Transformation>) -> Option<Transformation> {
    match (first, second) {
        (None, second) => second,
        (first, None) => first,
        (Some(first), Some(second)) => join(first, second),
    }
}

/// Compose three optional steps pairwise
pub fn concatenate3(
    first: Option<Transformation>,
    second: Option<Transformation>,
    third: Option<Transformation>,
) -> Option<Transformation> {
    concatenate(concatenate(first, second), third)
}

fn join(first: Transformation, second: Transformation) -> Option<Transformation> {
    match first {
        Transformation::Concatenated(head, tail) => {
            let rest = join(*tail, second);
            prepend(*head, rest)
        }
        atom => prepend(atom, normalize(second)),
    }
}

/// Flatten an arbitrary chain into the right-nested form
fn normalize(chain: Transformation) -> Option<Transformation> {
    match chain {
        Transformation::Concatenated(first, second) => join(*first, *second),
        atom if atom.is_identity() => None,
        atom => Some(atom),
    }
}

/// Put an atomic step in front of a normalized chain
fn prepend(atom: Transformation, rest: Option<Transformation>) -> Option<Transformation> {
    if let Transformation::Concatenated(..) = atom {
        return match rest {
            None => normalize(atom),
            Some(rest) => join(atom, rest),
        };
    }
    match rest {
        None => drop_identity(atom),
        Some(Transformation::Concatenated(head, tail)) => match merge(atom, *head) {
            Merge::Merged(None) => Some(*tail),
            Merge::Merged(Some(merged)) => prepend(merged, Some(*tail)),
            Merge::Kept(atom, head) => Some(Transformation::concatenated(
                atom,
                Transformation::Concatenated(Box::new(head), tail),
            )),
        },
        Some(next) => match merge(atom, next) {
            Merge::Merged(merged) => merged,
            Merge::Kept(first, second) => Some(Transformation::concatenated(first, second)),
        },
    }
}

fn drop_identity(step: Transformation) -> Option<Transformation> {
    if step.is_identity() { None } else { Some(step) }
}

fn merge(first: Transformation, second: Transformation) -> Merge {
    if first.is_identity() {
        return Merge::Merged(drop_identity(second));
    }
    if second.is_identity() {
        return Merge::Merged(Some(first));
    }
    if first.is_inverse_of(&second) {
        trace!("Dropping {} followed by its inverse", first.implementation_name());
        return Merge::Merged(None);
    }
    match (first, second) {
        (Transformation::Matrix(a), Transformation::Matrix(b)) => match a.then(&b) {
            Some(product) => Merge::Merged(drop_identity(Transformation::Matrix(product))),
            None => Merge::Kept(Transformation::Matrix(a), Transformation::Matrix(b)),
        },
        (first, second) => Merge::Kept(first, second),
    }
}
