// src/noyau/rpn.rs
//
// Shunting-yard : jetons infixes -> suite RPN (postfix)
//
// Règles:
// - littéral : sortie directe (les nombres ne passent JAMAIS par la pile)
// - constante : valeur résolue ici, émise comme littéral (inline à la
//   conversion, pas différée à l'évaluation)
// - `(` : empilée ; `)` : dépile vers la sortie jusqu'à la `(` (jetée, pas
//   émise), puis si le sommet est une fonction préfixe elle sort aussi :
//   c'est ainsi que `sin(x)` se colle à sa liste d'arguments
// - opérateur : dépile tant que le sommet est un opérateur de précédence
//   strictement supérieure, ou égale quand le nouveau est associé à gauche ;
//   un sommet `(` arrête le dépilage et le nouveau s'empile sans condition
// - fin de parcours : la pile se vide vers la sortie ; une `(` restante
//   signale des parenthèses non appariées

use super::constantes::RegistreConstantes;
use super::erreurs::ErreurCalc;
use super::jetons::Jeton;
use super::operateurs::{Associativite, RegistreOperateurs};

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Les jetons de sortie sont du texte : littéraux tels quels, constantes
/// déjà résolues en littéraux, noms d'opérateurs.
///
/// Exemple:
///   jetons: [Ident("sin"), LPar, Num("0"), RPar]
///   rpn:    ["0", "sin"]
pub fn to_rpn(
    jetons: &[Jeton],
    operateurs: &RegistreOperateurs,
    constantes: &RegistreConstantes,
) -> Result<Vec<String>, ErreurCalc> {
    let mut sortie: Vec<String> = Vec::new();
    let mut pile: Vec<String> = Vec::new();

    for jeton in jetons {
        match jeton {
            Jeton::Num(n) => sortie.push(n.clone()),

            Jeton::LPar => pile.push("(".to_string()),

            Jeton::RPar => {
                // dépile jusqu'à la `(`, qui est jetée
                loop {
                    match pile.pop() {
                        None => return Err(ErreurCalc::ParentheseNonAppariee),
                        Some(haut) if haut == "(" => break,
                        Some(haut) => sortie.push(haut),
                    }
                }

                // une fonction préfixe au sommet sort avec sa liste d'arguments
                let prefixe_au_sommet = match pile.last() {
                    Some(nom) if nom != "(" => !operateurs.operateur(nom)?.infixe,
                    _ => false,
                };
                if prefixe_au_sommet {
                    if let Some(nom) = pile.pop() {
                        sortie.push(nom);
                    }
                }
            }

            Jeton::Ident(nom) => {
                if operateurs.est_operateur(nom) {
                    let nouveau = operateurs.operateur(nom)?;
                    let gauche = nouveau.associativite == Associativite::Gauche;

                    while let Some(haut) = pile.last().cloned() {
                        if !operateurs.est_operateur(&haut) {
                            // sommet `(` : le nouveau s'empile sans condition
                            break;
                        }
                        let p_haut = operateurs.operateur(&haut)?.precedence;
                        let depiler = p_haut > nouveau.precedence
                            || (p_haut == nouveau.precedence && gauche);
                        if !depiler {
                            break;
                        }
                        pile.pop();
                        sortie.push(haut);
                    }

                    pile.push(nom.clone());
                } else if constantes.est_constante(nom) {
                    // inline : la constante devient un littéral
                    sortie.push(constantes.valeur(nom)?.to_string());
                } else {
                    return Err(ErreurCalc::SymboleInconnu(nom.clone()));
                }
            }
        }
    }

    // vide la pile ; une `(` ici n'a jamais été refermée
    while let Some(haut) = pile.pop() {
        if haut == "(" {
            return Err(ErreurCalc::ParentheseNonAppariee);
        }
        sortie.push(haut);
    }

    Ok(sortie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::jetons::tokenize;

    fn rpn(formule: &str) -> Result<Vec<String>, ErreurCalc> {
        let ops = RegistreOperateurs::default();
        let consts = RegistreConstantes::default();
        to_rpn(&tokenize(formule), &ops, &consts)
    }

    fn rpn_ok(formule: &str) -> Vec<String> {
        rpn(formule).unwrap_or_else(|e| panic!("to_rpn({formule:?}) erreur: {e}"))
    }

    #[test]
    fn precedence_simple() {
        assert_eq!(rpn_ok("1+2*3"), ["1", "2", "3", "*", "+"]);
    }

    #[test]
    fn parentheses_forcent_le_groupement() {
        assert_eq!(rpn_ok("(1+2)*3"), ["1", "2", "+", "3", "*"]);
    }

    #[test]
    fn associativite_gauche() {
        // (8-3)-2
        assert_eq!(rpn_ok("8-3-2"), ["8", "3", "-", "2", "-"]);
    }

    #[test]
    fn associativite_droite_pour_la_puissance() {
        // 2^(3^2) : un `^` entrant ne dépile pas un `^` déjà empilé
        assert_eq!(rpn_ok("2^3^2"), ["2", "3", "2", "^", "^"]);
    }

    #[test]
    fn fonction_prefixe_sort_apres_sa_parenthese() {
        assert_eq!(rpn_ok("sin(0)"), ["0", "sin"]);
    }

    #[test]
    fn fonctions_prefixes_imbriquees() {
        assert_eq!(rpn_ok("sin(cos(0))"), ["0", "cos", "sin"]);
    }

    #[test]
    fn operateur_infixe_ne_sort_pas_apres_la_parenthese() {
        // `~` est marqué infixe : pas de sortie automatique après `)`.
        // C'est le `+` entrant (précédence 0 < 5) qui le dépile.
        assert_eq!(rpn_ok("~(2)+1"), ["2", "~", "1", "+"]);
    }

    #[test]
    fn constante_resolue_en_litteral() {
        assert_eq!(rpn_ok("2*pi"), ["2", "3.1415926535", "*"]);
    }

    #[test]
    fn parenthese_fermante_orpheline() {
        assert_eq!(rpn("1+2)").unwrap_err(), ErreurCalc::ParentheseNonAppariee);
    }

    #[test]
    fn parenthese_ouvrante_jamais_fermee() {
        assert_eq!(rpn("(1+2").unwrap_err(), ErreurCalc::ParentheseNonAppariee);
    }

    #[test]
    fn symbole_non_classable() {
        assert_eq!(
            rpn("1+foo").unwrap_err(),
            ErreurCalc::SymboleInconnu("foo".to_string())
        );
    }

    #[test]
    fn registre_vide_ne_classe_rien() {
        let ops = RegistreOperateurs::vide();
        let consts = RegistreConstantes::vide();
        assert_eq!(
            to_rpn(&tokenize("1+2"), &ops, &consts).unwrap_err(),
            ErreurCalc::SymboleInconnu("+".to_string())
        );
    }
}
