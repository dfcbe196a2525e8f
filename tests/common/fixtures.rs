/// Expressions that must parse without a namespace resolver.
pub const VALID_EXPRESSIONS: &[&str] = &[
    "/",
    "*",
    "para",
    "child::para",
    "child::*",
    "child::text()",
    "child::node()",
    "attribute::name",
    "attribute::*",
    "descendant::para",
    "ancestor::div",
    "ancestor-or-self::div",
    "descendant-or-self::para",
    "self::para",
    "child::chapter/descendant::para",
    "child::*/child::para",
    "/descendant::para",
    "/descendant::olist/child::item",
    "child::para[position()=1]",
    "child::para[position()=last()]",
    "child::para[position()=last()-1]",
    "child::para[position()>1]",
    "following-sibling::chapter[position()=1]",
    "preceding-sibling::chapter[position()=1]",
    "/descendant::figure[position()=42]",
    "/child::doc/child::chapter[position()=5]/child::section[position()=2]",
    "child::para[attribute::type=\"warning\"]",
    "child::para[attribute::type='warning'][position()=5]",
    "child::chapter[child::title='Introduction']",
    "child::chapter[child::title]",
    "child::*[self::chapter or self::appendix]",
    "child::*[self::chapter or self::appendix][position()=last()]",
    "para[1]",
    "*/para",
    "/doc/chapter[5]/section[2]",
    "chapter//para",
    "//para",
    "//olist/item",
    ".",
    ".//para",
    "..",
    "../@lang",
    "para[@type=\"warning\"]",
    "para[@type=\"warning\"][5]",
    "chapter[title=\"Introduction\"]",
    "employee[@secretary and @assistant]",
    "namespace::*",
    "processing-instruction()",
    "processing-instruction('xml-stylesheet')",
    "comment()",
    "$var",
    "$var/item[1]",
    "($a | $b)[2]",
    "count(//item) div 2",
    "7 mod 3 * -2",
    "substring('12345', 1.5, 2.6)",
    "not(true()) = false()",
    "string-length(normalize-space(  ' a  b '  )) >= 3",
    "sum(//price) <= 100 and floor(1.5) != ceiling(1.5)",
    "id('foo')/child::para",
    "lang('en')",
    "- - 3",
    ".5 + 5.",
];

/// Expressions that must fail as syntax errors.
pub const INVALID_EXPRESSIONS: &[&str] = &[
    "",
    "   ",
    "'unterminated",
    "\"unterminated",
    "a !b",
    "child::",
    "unknown-axis::para",
    "para[",
    "para]",
    "(1",
    "1)",
    "f(",
    "count(1, 2)",
    "no-such-function()",
    "a b",
    "3.14.5",
    "//",
    "a//",
    "@",
    "$",
    "$1",
    "1 +",
    "* *",
    "text(1)",
    "processing-instruction(1)",
    "#",
];
