// src/noyau/moteur.rs
//
// Le moteur possédé par l'hôte : deux registres + le pipeline complet.
//
// tokenize -> RPN -> évaluation
//
// Les registres sont des champs publics : l'hôte les mute entre les
// évaluations (écrivain unique), puis évalue en lecture seule (&self).
// Aucun verrou ici ; écrire pendant qu'un autre thread évalue est à
// sérialiser côté hôte. Des évaluations concurrentes sur registres
// figés sont sûres.

use tracing::{debug, trace};

use super::constantes::RegistreConstantes;
use super::erreurs::ErreurCalc;
use super::eval;
use super::jetons::{format_tokens, tokenize};
use super::operateurs::RegistreOperateurs;
use super::rpn::to_rpn;

/// Moteur de calcul : registres nommés + conversion + évaluation.
///
/// `Moteur::default()` fournit la table intégrée (`+ - * / % ^ sqrt sin cos
/// tan ~`, constantes `pi` et `e`) ; `Moteur::vide()` démarre sans rien.
/// La suite RPN n'est ni retenue ni mise en cache entre deux appels ;
/// l'hôte qui veut un cache passe par `vers_rpn` + `eval_rpn`.
#[derive(Clone, Debug, Default)]
pub struct Moteur {
    pub operateurs: RegistreOperateurs,
    pub constantes: RegistreConstantes,
}

impl Moteur {
    /// Moteur sans aucun opérateur ni constante.
    pub fn vide() -> Self {
        Self {
            operateurs: RegistreOperateurs::vide(),
            constantes: RegistreConstantes::vide(),
        }
    }

    /// Pipeline complet : `calculer(f)` = évaluation de `vers_rpn(f)`.
    pub fn calculer(&self, formule: &str) -> Result<f64, ErreurCalc> {
        let rpn = self.vers_rpn(formule)?;
        let resultat = eval::eval_rpn(&rpn, &self.operateurs)?;
        debug!(formule, resultat, "calcul");
        Ok(resultat)
    }

    /// Conversion seule, exposée pour que l'hôte puisse inspecter la forme
    /// RPN ou la garder en cache.
    pub fn vers_rpn(&self, formule: &str) -> Result<Vec<String>, ErreurCalc> {
        let jetons = tokenize(formule);
        trace!(jetons = %format_tokens(&jetons), "tokenisation");

        let rpn = to_rpn(&jetons, &self.operateurs, &self.constantes)?;
        trace!(rpn = ?rpn, "conversion");
        Ok(rpn)
    }

    /// Évaluation d'une suite RPN déjà convertie (sommet de pile).
    pub fn eval_rpn(&self, rpn: &[String]) -> Result<f64, ErreurCalc> {
        eval::eval_rpn(rpn, &self.operateurs)
    }

    /// Variante multi-valeurs : pile finale complète, dans l'ordre.
    pub fn eval_rpn_multi(&self, rpn: &[String]) -> Result<Vec<f64>, ErreurCalc> {
        eval::eval_rpn_multi(rpn, &self.operateurs)
    }
}
