/// A Java type as written in source
///
/// Kept as the original string; structural interpretation happens in the
/// type lowerer, which re-parses these on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaType {
    pub original: String,
}

impl JavaType {
    pub fn new(original: impl Into<String>) -> Self {
        Self { original: original.into() }
    }
}

/// A declared type parameter (class-level or method-level), including any
/// upper bounds: `T extends Number & Comparable<T>` has two bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub bounds: Vec<JavaType>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), bounds: Vec::new() }
    }
}

/// Names of a type parameter list, in order
pub fn type_param_names(params: &[TypeParam]) -> Vec<String> {
    params.iter().map(|p| p.name.clone()).collect()
}

/// Merge outer and inner type parameters with Java-style shadowing: an inner
/// parameter with the same name as an outer one replaces it, and order is
/// outer-then-inner.
pub fn merge_type_params(outer: &[TypeParam], inner: &[TypeParam]) -> Vec<TypeParam> {
    if outer.is_empty() {
        return inner.to_vec();
    }
    if inner.is_empty() {
        return outer.to_vec();
    }

    let mut merged: Vec<TypeParam> = outer
        .iter()
        .filter(|o| !inner.iter().any(|i| i.name == o.name))
        .cloned()
        .collect();
    merged.extend(inner.iter().cloned());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_preserves_order() {
        let outer = vec![TypeParam::new("T"), TypeParam::new("U")];
        let inner = vec![TypeParam::new("V")];
        let merged = merge_type_params(&outer, &inner);
        assert_eq!(type_param_names(&merged), vec!["T", "U", "V"]);
    }

    #[test]
    fn test_merge_inner_shadows_outer() {
        let outer = vec![TypeParam::new("T"), TypeParam::new("U")];
        let inner = vec![TypeParam::new("T")];
        let merged = merge_type_params(&outer, &inner);
        assert_eq!(type_param_names(&merged), vec!["U", "T"]);
    }

    #[test]
    fn test_merge_empty_sides() {
        let params = vec![TypeParam::new("T")];
        assert_eq!(merge_type_params(&[], &params), params);
        assert_eq!(merge_type_params(&params, &[]), params);
    }
}
