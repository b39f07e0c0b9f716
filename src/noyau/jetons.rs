// src/noyau/jetons.rs

/// Jeton produit par la tokenisation, consommé tel quel ensuite.
///
/// NOTE: le classement d'un `Ident` (opérateur ? constante ? inconnu ?) se
/// fait dans rpn.rs, contre les registres. Ici on ne décide rien.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Jeton {
    /// Littéral numérique, gardé en texte (parse différé à l'évaluation).
    Num(String),

    /// Nom d'opérateur, de fonction ou de constante.
    Ident(String),

    LPar,
    RPar,
}

/// Tokenise une formule en jetons. Un seul passage, sans retour arrière.
/// Supporte:
/// - littéraux : suite de chiffres et de points (consommation gloutonne du
///   point : "1.2.3" sort en UN jeton ; l'évaluation signalera le nombre
///   mal formé)
/// - noms symboliques : suite de ponctuations ASCII, `(` et `)` exclus
///   (ex: `+`, `~`, `**`)
/// - noms alphabétiques : suite de lettres ASCII, sensible à la casse
///   (ex: `sin`, `pi`)
/// - parenthèses ( )
/// - blancs et virgules : séparateurs, ignorés (la virgule n'est PAS un
///   vrai séparateur d'arguments)
///
/// Jamais d'échec ici : un caractère inconnu devient un nom d'un caractère,
/// rejeté ensuite par le classement (SymboleInconnu).
pub fn tokenize(s: &str) -> Vec<Jeton> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() || c == ',' {
            i += 1;
            continue;
        }

        if c == '(' {
            out.push(Jeton::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::RPar);
            i += 1;
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            out.push(Jeton::Num(chars[start..i].iter().collect()));
            continue;
        }

        // Nom : le PREMIER caractère décide du mode (ponctuation ou lettres).
        let start = i;
        i += 1;
        if c.is_ascii_punctuation() {
            while i < chars.len()
                && chars[i].is_ascii_punctuation()
                && chars[i] != '('
                && chars[i] != ')'
            {
                i += 1;
            }
        } else {
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
        }
        out.push(Jeton::Ident(chars[start..i].iter().collect()));
    }

    out
}

/// Format utilitaire (diagnostic/traces) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    let mut out = Vec::new();
    for j in jetons {
        let s = match j {
            Jeton::Num(n) => n.clone(),
            Jeton::Ident(nom) => nom.clone(),
            Jeton::LPar => "(".to_string(),
            Jeton::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Jeton {
        Jeton::Num(s.to_string())
    }

    fn ident(s: &str) -> Jeton {
        Jeton::Ident(s.to_string())
    }

    #[test]
    fn litteraux_et_operateurs() {
        assert_eq!(
            tokenize("1+2*3"),
            vec![num("1"), ident("+"), num("2"), ident("*"), num("3")]
        );
    }

    #[test]
    fn litteral_decimal() {
        assert_eq!(tokenize("3.25"), vec![num("3.25")]);
    }

    #[test]
    fn litteral_points_gloutons() {
        // un seul jeton : le rejet viendra de l'évaluation
        assert_eq!(tokenize("1.2.3"), vec![num("1.2.3")]);
    }

    #[test]
    fn blancs_et_virgules_ignores() {
        assert_eq!(
            tokenize(" 1 ,\t2 "),
            vec![num("1"), num("2")]
        );
    }

    #[test]
    fn parentheses() {
        assert_eq!(
            tokenize("(1)"),
            vec![Jeton::LPar, num("1"), Jeton::RPar]
        );
    }

    #[test]
    fn nom_alphabetique_colle_a_sa_parenthese() {
        assert_eq!(
            tokenize("sin(0)"),
            vec![ident("sin"), Jeton::LPar, num("0"), Jeton::RPar]
        );
    }

    #[test]
    fn nom_symbolique_glouton() {
        // les ponctuations se collent en UN nom (hors parenthèses)
        assert_eq!(
            tokenize("1+-2"),
            vec![num("1"), ident("+-"), num("2")]
        );
    }

    #[test]
    fn ponctuation_ne_traverse_pas_les_parentheses() {
        assert_eq!(
            tokenize("~(2)"),
            vec![ident("~"), Jeton::LPar, num("2"), Jeton::RPar]
        );
    }

    #[test]
    fn ponctuation_non_enregistree_devient_nom() {
        // rejetée plus tard par le classement, pas ici
        assert_eq!(tokenize("1#2"), vec![num("1"), ident("#"), num("2")]);
    }

    #[test]
    fn format_tokens_lisible() {
        assert_eq!(format_tokens(&tokenize("1+sin(0)")), "1 + sin ( 0 )");
    }
}
