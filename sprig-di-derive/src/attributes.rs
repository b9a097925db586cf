use syn::meta::ParseNestedMeta;
use syn::{Attribute, Error, ExprArray, ExprPath, LitStr, Token};

pub enum DefaultDefinition {
    Default,
    Expr(ExprPath),
}

pub struct FieldAttributes {
    pub default: Option<DefaultDefinition>,
    pub inject: bool,
}

impl TryFrom<&Attribute> for FieldAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut default = None;
        let mut inject = false;
        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if meta.input.peek(Token![=]) {
                    default = Some(DefaultDefinition::Expr(parse_path(&meta)?));
                } else {
                    default = Some(DefaultDefinition::Default);
                }
            } else if meta.path.is_ident("inject") {
                inject = true;
            } else {
                return Err(meta.error("unsupported bean field property"));
            }

            Ok(())
        })?;

        Ok(Self { default, inject })
    }
}

pub struct BeanAttributes {
    pub name: Option<LitStr>,
    pub markers: Option<ExprArray>,
    pub constructor: Option<ExprPath>,
}

impl TryFrom<&Attribute> for BeanAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut name = None;
        let mut markers = None;
        let mut constructor = None;
        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value().and_then(|value| value.parse())?);
            } else if meta.path.is_ident("markers") {
                markers = Some(meta.value().and_then(|value| value.parse())?);
            } else if meta.path.is_ident("constructor") {
                constructor = Some(parse_path(&meta)?);
            } else {
                return Err(meta.error("unsupported bean property"));
            }

            Ok(())
        })?;

        Ok(Self {
            name,
            markers,
            constructor,
        })
    }
}

#[derive(Default)]
pub struct CapabilityAttributes {
    pub is_primary: bool,
}

impl CapabilityAttributes {
    pub fn parse(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("primary") {
            self.is_primary = true;
            Ok(())
        } else {
            Err(meta.error("unsupported capability property"))
        }
    }
}

fn parse_path(meta: &ParseNestedMeta) -> syn::Result<ExprPath> {
    let value = meta.value()?;
    let expr: LitStr = value.parse()?;
    expr.parse()
}
