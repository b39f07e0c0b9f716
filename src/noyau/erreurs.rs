// src/noyau/erreurs.rs

use thiserror::Error;

/// Erreurs du noyau, signalées au point de détection.
///
/// Contrat : une entrée malformée échoue de façon déterministe, le moteur ne
/// produit jamais un résultat silencieusement faux. La présentation à
/// l'utilisateur revient à l'application hôte.
///
/// Cas non couvert volontairement : un opérateur qui demande plus
/// d'opérandes que la pile n'en contient ne déclenche PAS d'erreur
/// (politique "meilleur effort", voir eval.rs).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    /// `)` sans `(` correspondante, ou `(` jamais refermée.
    #[error("parenthèses non appariées")]
    ParentheseNonAppariee,

    /// Nom lu dans la formule qui n'est ni opérateur ni constante.
    #[error("symbole \"{0}\" : ni opérateur ni constante enregistré")]
    SymboleInconnu(String),

    /// Consultation du registre d'opérateurs sur un nom absent.
    #[error("opérateur \"{0}\" non enregistré")]
    OperateurInconnu(String),

    /// Consultation du registre de constantes sur un nom absent.
    #[error("constante \"{0}\" non enregistrée")]
    ConstanteInconnue(String),

    /// Jeton littéral qui ne se lit pas comme un nombre à l'évaluation.
    #[error("nombre mal formé : \"{0}\"")]
    NombreMalForme(String),

    /// Pile d'opérandes vide en fin d'évaluation.
    #[error("expression vide : aucun résultat sur la pile")]
    ExpressionVide,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_affichables() {
        assert_eq!(
            ErreurCalc::SymboleInconnu("foo".to_string()).to_string(),
            "symbole \"foo\" : ni opérateur ni constante enregistré"
        );
        assert_eq!(
            ErreurCalc::ParentheseNonAppariee.to_string(),
            "parenthèses non appariées"
        );
    }
}
