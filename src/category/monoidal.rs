//! Monoidal category structures
//!
//! Gates acting on a register form a category: objects are qubit counts,
//! morphisms are reversible operations on that many qubits, composition is
//! sequential application and the tensor product places operations side by
//! side on disjoint wires.

use std::fmt::Debug;

/// Registers and the reversible operations between them.
pub trait Category {
    /// A register, typically identified by its qubit count
    type Object: Clone + Debug + PartialEq;

    /// An operation on a register. Equality is needed to check the laws.
    type Morphism: Clone + Debug + PartialEq;

    /// Register the operation reads
    fn domain(&self, f: &Self::Morphism) -> Self::Object;

    /// Register the operation writes
    fn codomain(&self, f: &Self::Morphism) -> Self::Object;

    /// The operation that leaves every state of `obj` alone
    fn identity(&self, obj: &Self::Object) -> Self::Morphism;

    /// Sequential composition: first `f`, then `g`.
    ///
    /// `None` when `f` writes a different register than `g` reads.
    fn compose(&self, f: &Self::Morphism, g: &Self::Morphism) -> Option<Self::Morphism>;

    /// Whether `g` can follow `f`
    fn can_compose(&self, f: &Self::Morphism, g: &Self::Morphism) -> bool {
        self.codomain(f) == self.domain(g)
    }
}

/// Side-by-side placement of operations on disjoint wires.
///
/// The left operand of a tensor product acts on the leading (most
/// significant) wires.
pub trait MonoidalCategory: Category {
    /// The empty register
    fn unit(&self) -> Self::Object;

    /// Concatenation of two registers
    fn tensor_objects(&self, a: &Self::Object, b: &Self::Object) -> Self::Object;

    /// `f` on the leading wires and `g` on the trailing ones
    fn tensor_morphisms(&self, f: &Self::Morphism, g: &Self::Morphism) -> Self::Morphism;

    /// λ_A: I ⊗ A → A
    fn left_unitor(&self, a: &Self::Object) -> Self::Morphism;

    /// ρ_A: A ⊗ I → A
    fn right_unitor(&self, a: &Self::Object) -> Self::Morphism;

    /// α_{A,B,C}: (A ⊗ B) ⊗ C → A ⊗ (B ⊗ C)
    fn associator(
        &self,
        a: &Self::Object,
        b: &Self::Object,
        c: &Self::Object
    ) -> Self::Morphism;
}

/// Reversal of operations. For reversible gates the dagger is the inverse.
pub trait DaggerCategory: Category {
    /// The operation undoing `f`
    fn dagger(&self, f: &Self::Morphism) -> Self::Morphism;
}

/// Verification of the category laws over sample objects and morphisms
pub mod laws {
    use super::*;

    /// Verify identity and associativity for a collection of test morphisms
    pub fn verify_category_laws<C: Category>(
        category: &C,
        test_objects: &[C::Object],
        test_morphisms: &[(C::Morphism, usize, usize)], // morphism, source_idx, target_idx
    ) -> bool {
        // Identity law: id_A then f = f = f then id_B for f: A → B
        let identity_law = test_morphisms.iter().all(|(f, src_idx, tgt_idx)| {
            let id_src = category.identity(&test_objects[*src_idx]);
            let id_tgt = category.identity(&test_objects[*tgt_idx]);

            match (category.compose(&id_src, f), category.compose(f, &id_tgt)) {
                (Some(left), Some(right)) => left == *f && right == *f,
                _ => false,
            }
        });

        // Associativity law: (f then g) then h = f then (g then h)
        let associativity_law = test_morphisms.iter().all(|(f, _, f_tgt)| {
            test_morphisms.iter().all(|(g, g_src, g_tgt)| {
                test_morphisms.iter().all(|(h, h_src, _)| {
                    if test_objects[*f_tgt] != test_objects[*g_src]
                        || test_objects[*g_tgt] != test_objects[*h_src]
                    {
                        return true;
                    }
                    let left = category.compose(f, g).and_then(|fg| category.compose(&fg, h));
                    let right = category.compose(g, h).and_then(|gh| category.compose(f, &gh));
                    matches!((left, right), (Some(l), Some(r)) if l == r)
                })
            })
        });

        identity_law && associativity_law
    }

    /// Verify the unit, associator and triangle laws of a monoidal category
    pub fn verify_monoidal_laws<C: MonoidalCategory>(
        category: &C,
        test_objects: &[C::Object],
    ) -> bool {
        if test_objects.is_empty() {
            return false;
        }

        // 1. Unitors have the expected domain and codomain
        let unit_laws = test_objects.iter().all(|a| {
            let left_unitor = category.left_unitor(a);
            let right_unitor = category.right_unitor(a);

            let expected_left_domain = category.tensor_objects(&category.unit(), a);
            let expected_right_domain = category.tensor_objects(a, &category.unit());

            category.domain(&left_unitor) == expected_left_domain
                && category.codomain(&left_unitor) == *a
                && category.domain(&right_unitor) == expected_right_domain
                && category.codomain(&right_unitor) == *a
        });

        // 2. α_{A,B,C}: (A ⊗ B) ⊗ C → A ⊗ (B ⊗ C)
        let associativity_laws = test_objects.iter().all(|a| {
            test_objects.iter().all(|b| {
                test_objects.iter().all(|c| {
                    let associator = category.associator(a, b, c);
                    let ab = category.tensor_objects(a, b);
                    let bc = category.tensor_objects(b, c);

                    category.domain(&associator) == category.tensor_objects(&ab, c)
                        && category.codomain(&associator) == category.tensor_objects(a, &bc)
                })
            })
        });

        // 3. Triangle identity: α_{A,I,B} then (1_A ⊗ λ_B) = ρ_A ⊗ 1_B
        let triangle_identity = test_objects.iter().all(|a| {
            test_objects.iter().all(|b| {
                let unit = category.unit();
                let associator = category.associator(a, &unit, b);
                let id_a = category.identity(a);
                let id_b = category.identity(b);

                let id_a_tensor_left_unitor_b =
                    category.tensor_morphisms(&id_a, &category.left_unitor(b));
                let right_unitor_a_tensor_id_b =
                    category.tensor_morphisms(&category.right_unitor(a), &id_b);

                match category.compose(&associator, &id_a_tensor_left_unitor_b) {
                    Some(left_side) => left_side == right_unitor_a_tensor_id_b,
                    None => false,
                }
            })
        });

        unit_laws && associativity_laws && triangle_identity
    }

    /// Verify that the dagger is involutive and reverses composition
    pub fn verify_dagger_laws<C: DaggerCategory>(
        category: &C,
        test_morphisms: &[C::Morphism],
    ) -> bool {
        if test_morphisms.is_empty() {
            return false;
        }

        // 1. Involutive: (f†)† = f
        let involutive_law = test_morphisms.iter().all(|f| {
            category.dagger(&category.dagger(f)) == *f
        });

        // 2. Contravariant: (g then f)† = f† then g†
        let contravariant_law = test_morphisms.iter().all(|f| {
            test_morphisms.iter().all(|g| {
                match category.compose(g, f) {
                    Some(g_then_f) => {
                        let dagger_f = category.dagger(f);
                        let dagger_g = category.dagger(g);
                        category.compose(&dagger_f, &dagger_g)
                            .map_or(false, |reversed| category.dagger(&g_then_f) == reversed)
                    }
                    // Vacuously true when the pair does not compose
                    None => true,
                }
            })
        });

        involutive_law && contravariant_law
    }
}
