// src/noyau/constantes.rs
//
// Registre de constantes nommées (nom alphabétique -> valeur).
// Les constantes sont résolues à la CONVERSION (inline dans la suite RPN),
// pas à l'évaluation : voir rpn.rs.

use std::collections::HashMap;

use super::erreurs::ErreurCalc;

/// Registre des constantes. Même discipline d'accès que le registre
/// d'opérateurs : écrivain unique côté hôte, lectures partagées ensuite.
#[derive(Clone, Debug)]
pub struct RegistreConstantes {
    table: HashMap<String, f64>,
}

impl RegistreConstantes {
    /// Registre sans aucune constante.
    pub fn vide() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Existence d'un nom. Ne peut pas échouer.
    pub fn est_constante(&self, nom: &str) -> bool {
        self.table.contains_key(nom)
    }

    /// Valeur d'une constante enregistrée.
    pub fn valeur(&self, nom: &str) -> Result<f64, ErreurCalc> {
        self.table
            .get(nom)
            .copied()
            .ok_or_else(|| ErreurCalc::ConstanteInconnue(nom.to_string()))
    }

    /// Enregistre une constante. Écrase toujours la valeur existante.
    pub fn inscrire(&mut self, nom: &str, valeur: f64) {
        self.table.insert(nom.to_string(), valeur);
    }
}

impl Default for RegistreConstantes {
    /// Constantes intégrées : `pi` et `e`, tronquées à 10 décimales.
    fn default() -> Self {
        let mut r = Self::vide();
        r.inscrire("pi", 3.1415926535);
        r.inscrire("e", 2.7182818284);
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constantes_integrees() {
        let r = RegistreConstantes::default();
        assert!(r.est_constante("pi"));
        assert!(r.est_constante("e"));
        assert_eq!(r.valeur("pi").unwrap(), 3.1415926535);
        assert_eq!(r.valeur("e").unwrap(), 2.7182818284);
    }

    #[test]
    fn casse_stricte() {
        let r = RegistreConstantes::default();
        assert!(!r.est_constante("PI"));
    }

    #[test]
    fn nom_absent() {
        let r = RegistreConstantes::vide();
        assert_eq!(
            r.valeur("tau").unwrap_err(),
            ErreurCalc::ConstanteInconnue("tau".to_string())
        );
    }

    #[test]
    fn inscription_ecrase_toujours() {
        let mut r = RegistreConstantes::default();
        r.inscrire("pi", 3.0);
        assert_eq!(r.valeur("pi").unwrap(), 3.0);

        r.inscrire("tau", 6.2831853070);
        assert_eq!(r.valeur("tau").unwrap(), 6.2831853070);
    }
}
