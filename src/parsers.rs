#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

peg::parser! {
    /// grammars for picking apart submission file names.
    pub grammar parser() for str {
        /// matches one ascii digit
        rule digit() = ['0'..='9']

        /// matches any character that is not an ascii digit
        rule non_digit() = [^ '0'..='9']

        /// matches a maximal run of digits
        rule digit_run() -> &'input str
            = $(digit()+)

        /// splits a name into its maximal digit runs, left to right.
        /// `report_123_45678901.py` yields `["123", "45678901"]`.
        pub rule digit_runs() -> Vec<&'input str>
            = non_digit()*
              runs:(digit_run() ** (non_digit()+))
              non_digit()*
            { runs }
    }
}
