// src/noyau/eval.rs
//
// Évaluation d'une suite RPN sur une pile d'opérandes unique.
//
// Politique "meilleur effort" sur la pile : un opérateur prend jusqu'à
// `arite` opérandes, moins si la pile s'épuise avant. Ce n'est PAS une
// erreur ; les fonctions intégrées rendent NaN pour les opérandes
// manquants.

use super::erreurs::ErreurCalc;
use super::operateurs::RegistreOperateurs;

/// Évalue une suite RPN et retourne la pile finale COMPLÈTE, dans l'ordre
/// (fond de pile d'abord). Variante multi-valeurs : un opérateur peut
/// pousser plusieurs résultats, tous présents ici.
pub fn eval_rpn_multi(
    rpn: &[String],
    operateurs: &RegistreOperateurs,
) -> Result<Vec<f64>, ErreurCalc> {
    let mut pile: Vec<f64> = Vec::new();

    for jeton in rpn {
        if !operateurs.est_operateur(jeton) {
            let v: f64 = jeton
                .parse()
                .map_err(|_| ErreurCalc::NombreMalForme(jeton.clone()))?;
            pile.push(v);
            continue;
        }

        let op = operateurs.operateur(jeton)?;

        // jusqu'à `arite` opérandes ; l'ordre de dépilage est l'inverse de
        // l'ordre d'écriture, d'où le reverse
        let mut args: Vec<f64> = Vec::with_capacity(op.arite);
        while args.len() < op.arite {
            match pile.pop() {
                Some(v) => args.push(v),
                None => break,
            }
        }
        args.reverse();

        // chaque résultat repart sur la pile, ordre préservé
        pile.extend((op.fonction)(&args));
    }

    if pile.is_empty() {
        return Err(ErreurCalc::ExpressionVide);
    }
    Ok(pile)
}

/// Évalue une suite RPN et retourne le sommet de la pile finale.
pub fn eval_rpn(rpn: &[String], operateurs: &RegistreOperateurs) -> Result<f64, ErreurCalc> {
    let pile = eval_rpn_multi(rpn, operateurs)?;
    pile.last().copied().ok_or(ErreurCalc::ExpressionVide)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::operateurs::{Associativite, Operateur};

    fn s(jetons: &[&str]) -> Vec<String> {
        jetons.iter().map(|j| j.to_string()).collect()
    }

    #[test]
    fn addition_simple() {
        let ops = RegistreOperateurs::default();
        assert_eq!(eval_rpn(&s(&["1", "2", "+"]), &ops).unwrap(), 3.0);
    }

    #[test]
    fn ordre_des_operandes_retabli() {
        // 8 3 - = 8-3 (et surtout pas 3-8)
        let ops = RegistreOperateurs::default();
        assert_eq!(eval_rpn(&s(&["8", "3", "-"]), &ops).unwrap(), 5.0);
    }

    #[test]
    fn litteral_seul() {
        let ops = RegistreOperateurs::default();
        assert_eq!(eval_rpn(&s(&["42"]), &ops).unwrap(), 42.0);
    }

    #[test]
    fn pile_courte_sans_erreur() {
        // `+` veut 2 opérandes, n'en trouve qu'un : NaN, pas d'échec
        let ops = RegistreOperateurs::default();
        assert!(eval_rpn(&s(&["5", "+"]), &ops).unwrap().is_nan());
    }

    #[test]
    fn nombre_mal_forme() {
        let ops = RegistreOperateurs::default();
        assert_eq!(
            eval_rpn(&s(&["1.2.3"]), &ops).unwrap_err(),
            ErreurCalc::NombreMalForme("1.2.3".to_string())
        );
    }

    #[test]
    fn suite_vide() {
        let ops = RegistreOperateurs::default();
        assert_eq!(eval_rpn(&[], &ops).unwrap_err(), ErreurCalc::ExpressionVide);
    }

    #[test]
    fn pile_finale_complete_dans_l_ordre() {
        // deux littéraux jamais consommés : la variante multi rend tout
        let ops = RegistreOperateurs::default();
        assert_eq!(
            eval_rpn_multi(&s(&["1", "2", "3"]), &ops).unwrap(),
            vec![1.0, 2.0, 3.0]
        );
        // le sommet reste le dernier poussé
        assert_eq!(eval_rpn(&s(&["1", "2", "3"]), &ops).unwrap(), 3.0);
    }

    #[test]
    fn operateur_multi_valeurs() {
        let mut ops = RegistreOperateurs::default();
        // quotient ET reste, poussés dans l'ordre
        ops.inscrire(
            "divmod",
            Operateur::prefixe(2, 4, Associativite::Droite, |a| {
                let (x, y) = (a[0], a[1]);
                vec![(x / y).trunc(), x % y]
            }),
            false,
        );

        assert_eq!(
            eval_rpn_multi(&s(&["7", "2", "divmod"]), &ops).unwrap(),
            vec![3.0, 1.0]
        );
        // le sommet est le DERNIER résultat poussé
        assert_eq!(eval_rpn(&s(&["7", "2", "divmod"]), &ops).unwrap(), 1.0);
    }

    #[test]
    fn resultats_multi_reconsommables() {
        let mut ops = RegistreOperateurs::default();
        ops.inscrire(
            "dup",
            Operateur::prefixe(1, 4, Associativite::Droite, |a| vec![a[0], a[0]]),
            false,
        );

        // dup pousse deux fois 3, le * les reprend : 9
        assert_eq!(eval_rpn(&s(&["3", "dup", "*"]), &ops).unwrap(), 9.0);
    }
}
