// src/noyau/operateurs.rs
//
// Registre d'opérateurs : définitions nommées, infixes (`a + b`) et
// fonctions préfixes (`sin(x)`).
//
// Table intégrée, précédences croissantes :
//   + -  (0)  <  * /  (1)  <  %  (2)  <  ^ sqrt  (3)  <  sin cos tan  (4)  <  ~  (5)
// `^`, les fonctions préfixes et `~` sont associés à droite, le reste à gauche.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::erreurs::ErreurCalc;

/// Fonction d'opérateur : opérandes ordonnés en entrée, résultats ordonnés
/// en sortie. Un opérateur multi-valeurs retourne plusieurs résultats, tous
/// repoussés sur la pile dans l'ordre.
///
/// Closures, pointeurs de fonction et foncteurs sont interchangeables ici.
pub type FnOperateur = Arc<dyn Fn(&[f64]) -> Vec<f64> + Send + Sync>;

/// Associativité (départage du dépilage à précédence égale).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativite {
    Gauche,
    Droite,
}

/// Définition d'un opérateur nommé.
///
/// `arite` est un MAXIMUM : l'évaluateur fournit moins d'opérandes si la
/// pile s'épuise avant (politique "meilleur effort", voir eval.rs). Une
/// fonction d'opérateur doit donc tolérer une liste courte.
#[derive(Clone)]
pub struct Operateur {
    pub arite: usize,
    pub fonction: FnOperateur,
    pub precedence: usize,
    pub associativite: Associativite,
    /// true : écrit entre ses opérandes (`a + b`).
    /// false : fonction préfixe, écrite devant une liste parenthésée (`sin(x)`).
    pub infixe: bool,
}

impl Operateur {
    /// Opérateur infixe.
    pub fn infixe(
        arite: usize,
        precedence: usize,
        associativite: Associativite,
        fonction: impl Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    ) -> Self {
        Self {
            arite,
            fonction: Arc::new(fonction),
            precedence,
            associativite,
            infixe: true,
        }
    }

    /// Fonction préfixe (sortie après la parenthèse fermante de sa liste
    /// d'arguments, voir rpn.rs).
    pub fn prefixe(
        arite: usize,
        precedence: usize,
        associativite: Associativite,
        fonction: impl Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    ) -> Self {
        Self {
            arite,
            fonction: Arc::new(fonction),
            precedence,
            associativite,
            infixe: false,
        }
    }
}

// Debug manuel : la fonction n'a pas de représentation utile.
impl fmt::Debug for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operateur")
            .field("arite", &self.arite)
            .field("precedence", &self.precedence)
            .field("associativite", &self.associativite)
            .field("infixe", &self.infixe)
            .finish_non_exhaustive()
    }
}

/// Registre des opérateurs.
///
/// Consulté en lecture seule par la conversion et l'évaluation. Aucun
/// verrou : écrivain unique côté hôte, lectures partagées ensuite (voir la
/// doc de `Moteur`).
#[derive(Clone, Debug)]
pub struct RegistreOperateurs {
    table: HashMap<String, Operateur>,
}

impl RegistreOperateurs {
    /// Registre sans aucun opérateur (même pas la table intégrée).
    pub fn vide() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Existence d'un nom. Ne peut pas échouer.
    pub fn est_operateur(&self, nom: &str) -> bool {
        self.table.contains_key(nom)
    }

    /// Définition complète d'un opérateur enregistré.
    pub fn operateur(&self, nom: &str) -> Result<&Operateur, ErreurCalc> {
        self.table
            .get(nom)
            .ok_or_else(|| ErreurCalc::OperateurInconnu(nom.to_string()))
    }

    /// Enregistre `op` sous `nom`.
    ///
    /// - `ecraser = false` : no-op si le nom existe déjà (la première
    ///   définition reste en place).
    /// - `ecraser = true`  : remplace sans condition.
    ///
    /// Retourne true si la définition a été stockée.
    pub fn inscrire(&mut self, nom: &str, op: Operateur, ecraser: bool) -> bool {
        if !ecraser && self.table.contains_key(nom) {
            return false;
        }
        self.table.insert(nom.to_string(), op);
        true
    }

    /// Remplace SEULEMENT la fonction d'un opérateur déjà enregistré ;
    /// arité, précédence, associativité et notation restent en place.
    pub fn redefinir_fonction(
        &mut self,
        nom: &str,
        fonction: impl Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    ) -> Result<(), ErreurCalc> {
        match self.table.get_mut(nom) {
            Some(op) => {
                op.fonction = Arc::new(fonction);
                Ok(())
            }
            None => Err(ErreurCalc::OperateurInconnu(nom.to_string())),
        }
    }

    /// Noms enregistrés, ordre quelconque (complétion / messages côté hôte).
    pub fn noms(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }
}

/// Opérande d'indice `i`, ou NaN si la pile n'en a pas fourni assez.
/// Jamais de panique dans une fonction intégrée.
fn arg(args: &[f64], i: usize) -> f64 {
    args.get(i).copied().unwrap_or(f64::NAN)
}

/// Modulo entier par troncature (`a` et `b` tronqués avant le reste).
/// Diviseur nul après troncature => NaN.
fn modulo_entier(a: f64, b: f64) -> f64 {
    let (a, b) = (a as i64, b as i64);
    if b == 0 {
        return f64::NAN;
    }
    (a % b) as f64
}

impl Default for RegistreOperateurs {
    /// Table intégrée : `+ - * / % ^ sqrt sin cos tan ~`.
    fn default() -> Self {
        use Associativite::{Droite, Gauche};

        let mut r = Self::vide();

        r.inscrire(
            "+",
            Operateur::infixe(2, 0, Gauche, |a| vec![arg(a, 0) + arg(a, 1)]),
            true,
        );
        r.inscrire(
            "-",
            Operateur::infixe(2, 0, Gauche, |a| vec![arg(a, 0) - arg(a, 1)]),
            true,
        );
        r.inscrire(
            "*",
            Operateur::infixe(2, 1, Gauche, |a| vec![arg(a, 0) * arg(a, 1)]),
            true,
        );
        r.inscrire(
            "/",
            Operateur::infixe(2, 1, Gauche, |a| vec![arg(a, 0) / arg(a, 1)]),
            true,
        );
        r.inscrire(
            "%",
            Operateur::infixe(2, 2, Gauche, |a| vec![modulo_entier(arg(a, 0), arg(a, 1))]),
            true,
        );
        r.inscrire(
            "^",
            Operateur::infixe(2, 3, Droite, |a| vec![arg(a, 0).powf(arg(a, 1))]),
            true,
        );

        // Arité déclarée 1, mais le corps lit un indice de racine en
        // deuxième opérande (forme racine n-ième) : l'évaluateur ne le
        // fournira donc jamais et le résultat est NaN. Mésalliance
        // conservée telle quelle.
        r.inscrire(
            "sqrt",
            Operateur::prefixe(1, 3, Droite, |a| vec![arg(a, 0).powf(1.0 / arg(a, 1))]),
            true,
        );

        r.inscrire(
            "sin",
            Operateur::prefixe(1, 4, Droite, |a| vec![arg(a, 0).sin()]),
            true,
        );
        r.inscrire(
            "cos",
            Operateur::prefixe(1, 4, Droite, |a| vec![arg(a, 0).cos()]),
            true,
        );
        r.inscrire(
            "tan",
            Operateur::prefixe(1, 4, Droite, |a| vec![arg(a, 0).tan()]),
            true,
        );

        // Négation unaire. Marquée infixe (pas préfixe) : elle ne déclenche
        // donc pas la sortie de fonction après `)` dans rpn.rs.
        r.inscrire(
            "~",
            Operateur::infixe(1, 5, Droite, |a| vec![-arg(a, 0)]),
            true,
        );

        r
    }
}
