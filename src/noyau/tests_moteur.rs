//! Tests moteur (campagne) : propriétés du pipeline + robustesse.
//!
//! Couverture :
//! - loi de composition : calculer == vers_rpn puis eval_rpn
//! - précédence, associativité, parenthèses, fonctions préfixes
//! - registres : inscription (avec/sans écrasement), redéfinition, constantes
//! - politiques assumées : pile courte => NaN, virgule = séparateur ignoré
//! - fuzz déterministe (seed fixe, formules bien formées, budget temps)

use std::time::{Duration, Instant};

use super::erreurs::ErreurCalc;
use super::moteur::Moteur;
use super::operateurs::{Associativite, Operateur};

fn calc(m: &Moteur, formule: &str) -> f64 {
    m.calculer(formule)
        .unwrap_or_else(|e| panic!("calculer({formule:?}) erreur: {e}"))
}

fn assert_proche(obtenu: f64, attendu: f64, contexte: &str) {
    if (obtenu - attendu).abs() > 1e-9 {
        panic!("{contexte}: obtenu {obtenu}, attendu {attendu}");
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {max:?}");
    }
}

/* ------------------------ Loi de composition ------------------------ */

#[test]
fn composition_calculer_egale_rpn_puis_eval() {
    let m = Moteur::default();
    for formule in [
        "1+2*3",
        "(1+2)*3",
        "2^3^2",
        "8-3-2",
        "sin(0)+cos(0)",
        "2*pi",
        "10%3*2",
        "~5+1",
    ] {
        let direct = calc(&m, formule);
        let en_deux_temps = m
            .eval_rpn(&m.vers_rpn(formule).unwrap())
            .unwrap_or_else(|e| panic!("eval_rpn({formule:?}) erreur: {e}"));
        assert_eq!(
            direct.to_bits(),
            en_deux_temps.to_bits(),
            "composition brisée pour {formule:?}"
        );
    }
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn precedence_mul_avant_add() {
    let m = Moteur::default();
    assert_eq!(m.vers_rpn("1+2*3").unwrap(), ["1", "2", "3", "*", "+"]);
    assert_proche(calc(&m, "1+2*3"), 7.0, "1+2*3");
}

#[test]
fn precedence_modulo_avant_mul() {
    // `%` (2) lie plus fort que `*` (1) : (10%3)*2
    let m = Moteur::default();
    assert_proche(calc(&m, "10%3*2"), 2.0, "10%3*2");
}

#[test]
fn puissance_associee_a_droite() {
    // 2^(3^2) = 512, pas (2^3)^2 = 64
    let m = Moteur::default();
    assert_proche(calc(&m, "2^3^2"), 512.0, "2^3^2");
}

#[test]
fn soustraction_associee_a_gauche() {
    // (8-3)-2 = 3
    let m = Moteur::default();
    assert_proche(calc(&m, "8-3-2"), 3.0, "8-3-2");
}

#[test]
fn parentheses_groupent() {
    let m = Moteur::default();
    assert_proche(calc(&m, "(1+2)*3"), 9.0, "(1+2)*3");
}

/* ------------------------ Fonctions préfixes / négation ------------------------ */

#[test]
fn fonction_prefixe_groupe_son_argument() {
    let m = Moteur::default();
    assert_proche(calc(&m, "sin(0)"), 0.0, "sin(0)");
    assert_proche(calc(&m, "cos(0)"), 1.0, "cos(0)");
    assert_proche(calc(&m, "sin(cos(0))"), 1.0_f64.sin(), "sin(cos(0))");
}

#[test]
fn negation_unaire() {
    let m = Moteur::default();
    assert_proche(calc(&m, "~5"), -5.0, "~5");
    assert_proche(calc(&m, "2*~3"), -6.0, "2*~3");
    assert_proche(calc(&m, "~(1+2)"), -3.0, "~(1+2)");
}

#[test]
fn racine_integree_rend_nan() {
    // arité 1 déclarée, corps en racine n-ième : l'indice manque toujours
    let m = Moteur::default();
    assert!(calc(&m, "sqrt(4)").is_nan());
}

/* ------------------------ Constantes ------------------------ */

#[test]
fn substitution_de_constante_sans_perte() {
    let m = Moteur::default();
    // égalité STRICTE : la valeur inscrite traverse la conversion intacte
    assert_eq!(calc(&m, "2*pi"), 2.0 * 3.1415926535);
    assert_eq!(calc(&m, "e"), 2.7182818284);
}

#[test]
fn constante_hote_ecrase_et_sert() {
    let mut m = Moteur::default();
    m.constantes.inscrire("reponse", 42.0);
    assert_proche(calc(&m, "reponse+1"), 43.0, "reponse+1");

    m.constantes.inscrire("reponse", 7.0);
    assert_proche(calc(&m, "reponse+1"), 8.0, "reponse+1 (écrasée)");
}

/* ------------------------ Registres côté hôte ------------------------ */

#[test]
fn operateur_hote_infixe() {
    let mut m = Moteur::default();
    // minimum de deux valeurs, précédence au niveau de `*`
    m.operateurs.inscrire(
        "<?",
        Operateur::infixe(2, 1, Associativite::Gauche, |a| {
            vec![a.first().copied().unwrap_or(f64::NAN).min(a.get(1).copied().unwrap_or(f64::NAN))]
        }),
        false,
    );
    assert_proche(calc(&m, "3<?2+10"), 12.0, "3<?2+10");
}

#[test]
fn operateur_hote_multi_valeurs() {
    let mut m = Moteur::default();
    m.operateurs.inscrire(
        "dup",
        Operateur::prefixe(1, 4, Associativite::Droite, |a| vec![a[0], a[0]]),
        false,
    );

    let rpn = m.vers_rpn("dup(3)").unwrap();
    assert_eq!(rpn, ["3", "dup"]);
    assert_eq!(m.eval_rpn_multi(&rpn).unwrap(), vec![3.0, 3.0]);
    assert_proche(calc(&m, "dup(3)*2"), 6.0, "dup(3)*2");
}

#[test]
fn redefinition_de_fonction_seule() {
    let mut m = Moteur::default();
    m.operateurs
        .redefinir_fonction("sin", |a| vec![a.first().copied().unwrap_or(f64::NAN) * 10.0])
        .unwrap();

    // profil (préfixe, précédence) conservé, corps remplacé
    assert_proche(calc(&m, "sin(2)+1"), 21.0, "sin(2)+1 (redéfini)");

    assert_eq!(
        m.operateurs.redefinir_fonction("jamaisvu", |_| vec![]).unwrap_err(),
        ErreurCalc::OperateurInconnu("jamaisvu".to_string())
    );
}

/* ------------------------ Erreurs (fail-fast) ------------------------ */

#[test]
fn parentheses_non_appariees_dans_les_deux_sens() {
    let m = Moteur::default();
    assert_eq!(
        m.vers_rpn("(1+2").unwrap_err(),
        ErreurCalc::ParentheseNonAppariee
    );
    assert_eq!(
        m.vers_rpn("1+2)").unwrap_err(),
        ErreurCalc::ParentheseNonAppariee
    );
}

#[test]
fn symbole_inconnu() {
    let m = Moteur::default();
    assert_eq!(
        m.calculer("1+foo").unwrap_err(),
        ErreurCalc::SymboleInconnu("foo".to_string())
    );
}

#[test]
fn nombre_mal_forme_detecte_a_l_evaluation() {
    let m = Moteur::default();
    // la tokenisation laisse passer, l'évaluation tranche
    assert_eq!(m.vers_rpn("1.2.3").unwrap(), ["1.2.3"]);
    assert_eq!(
        m.calculer("1.2.3").unwrap_err(),
        ErreurCalc::NombreMalForme("1.2.3".to_string())
    );
}

#[test]
fn entree_vide_ou_blanche() {
    let m = Moteur::default();
    assert_eq!(m.calculer("").unwrap_err(), ErreurCalc::ExpressionVide);
    assert_eq!(m.calculer("  , ").unwrap_err(), ErreurCalc::ExpressionVide);
}

/* ------------------------ Politiques assumées ------------------------ */

#[test]
fn pile_courte_rend_nan_sans_erreur() {
    let m = Moteur::default();
    // `+` ne trouve qu'un opérande : calcul "meilleur effort", pas d'échec
    assert!(calc(&m, "5+").is_nan());
}

#[test]
fn virgule_simple_separateur() {
    let m = Moteur::default();
    // pas un séparateur d'arguments : juste ignorée
    assert_eq!(m.vers_rpn("1,2").unwrap(), ["1", "2"]);
    assert_eq!(m.eval_rpn_multi(&m.vers_rpn("1,2").unwrap()).unwrap(), vec![1.0, 2.0]);
    // le sommet de pile gagne
    assert_proche(calc(&m, "1,2"), 2.0, "1,2");
}

#[test]
fn moteur_vide_ne_connait_rien() {
    let m = Moteur::vide();
    assert_eq!(
        m.calculer("1+2").unwrap_err(),
        ErreurCalc::SymboleInconnu("+".to_string())
    );
}

#[test]
fn casse_stricte_sur_les_noms() {
    let m = Moteur::default();
    assert_eq!(
        m.calculer("SIN(0)").unwrap_err(),
        ErreurCalc::SymboleInconnu("SIN".to_string())
    );
}

/* ------------------------ Fuzz déterministe (safe) ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/// Formule bien formée, profondeur bornée. Les opérateurs binaires sont
/// entourés d'espaces : deux ponctuations adjacentes se colleraient en un
/// seul nom (voir jetons.rs).
fn genere_formule(rng: &mut Rng, profondeur: u32, out: &mut String) {
    if profondeur == 0 || rng.pick(4) == 0 {
        out.push_str(&rng.pick(100).to_string());
        return;
    }

    match rng.pick(6) {
        0 | 1 | 2 => {
            let op = ["+", "-", "*", "/", "^", "%"][rng.pick(6) as usize];
            out.push('(');
            genere_formule(rng, profondeur - 1, out);
            out.push(' ');
            out.push_str(op);
            out.push(' ');
            genere_formule(rng, profondeur - 1, out);
            out.push(')');
        }
        3 | 4 => {
            let f = ["sin", "cos", "tan"][rng.pick(3) as usize];
            out.push_str(f);
            out.push('(');
            genere_formule(rng, profondeur - 1, out);
            out.push(')');
        }
        _ => {
            out.push_str("~(");
            genere_formule(rng, profondeur - 1, out);
            out.push(')');
        }
    }
}

#[test]
fn fuzz_composition_et_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let m = Moteur::default();
    let mut rng = Rng::new(0xC0FFEE);

    for k in 0..300 {
        let mut formule = String::new();
        genere_formule(&mut rng, 4, &mut formule);

        let a = m
            .calculer(&formule)
            .unwrap_or_else(|e| panic!("itération {k}, formule {formule:?}: {e}"));
        let b = m.eval_rpn(&m.vers_rpn(&formule).unwrap()).unwrap();
        let c = m.calculer(&formule).unwrap();

        // comparaison par bits : NaN et infinis compris
        assert_eq!(a.to_bits(), b.to_bits(), "composition, formule {formule:?}");
        assert_eq!(a.to_bits(), c.to_bits(), "déterminisme, formule {formule:?}");

        budget(t0, max);
    }
}
