// src/lib.rs
//
// Moteur RPN : bibliothèque de calcul embarquable
// -----------------------------------------------
// Rôle:
// - Moteur pur (aucune E/S, aucune UI, aucun état persistant) à lier dans
//   une application hôte : calculatrice, champ de formule, expression de
//   configuration.
// - L'hôte possède le `Moteur` (registres d'opérateurs et de constantes),
//   l'alimente avant d'évaluer, puis appelle `calculer` / `vers_rpn` /
//   `eval_rpn` en lecture seule.
//
// IMPORTANT (structure projet):
// - Toute la logique vit dans src/noyau/ (un fichier par étage du pipeline).
// - Ici: déclarations + ré-exports seulement.

pub mod noyau;

pub use noyau::constantes::RegistreConstantes;
pub use noyau::erreurs::ErreurCalc;
pub use noyau::moteur::Moteur;
pub use noyau::operateurs::{Associativite, FnOperateur, Operateur, RegistreOperateurs};
