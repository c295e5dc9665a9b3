//! The display surface the root mount renders into.

/// Receives rendered nodes and reconciles them against what is displayed.
///
/// Diffing and painting are the surface's business; the router only hands
/// over a complete node after every location change.
pub trait DisplaySurface<N> {
    /// Replaces the displayed output with `node`.
    fn reconcile(&mut self, node: N);
}

/// Records every reconciled node. Useful for headless runs and tests.
impl<N> DisplaySurface<N> for Vec<N> {
    fn reconcile(&mut self, node: N) {
        self.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_surface_records_in_order() {
        let mut surface: Vec<String> = Vec::new();
        surface.reconcile("a".to_string());
        surface.reconcile("b".to_string());
        assert_eq!(surface, vec!["a", "b"]);
    }
}
