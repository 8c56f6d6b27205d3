/// One branch of a visitor: what to do when the active alternative is a `T`.
///
/// A union's `visit` requires an impl for every alternative type, so a missing branch is a
/// compile error rather than a runtime miss. When a type is listed twice, both positions run
/// the same impl.
pub trait Visitor<T: ?Sized> {
    type Output;

    fn visit(&mut self, value: &T) -> Self::Output;
}

/// Like [`Visitor`], but handed the live value mutably.
pub trait VisitorMut<T: ?Sized> {
    type Output;

    fn visit_mut(&mut self, value: &mut T) -> Self::Output;
}

impl<T: ?Sized, V: Visitor<T> + ?Sized> Visitor<T> for &mut V {
    type Output = V::Output;

    #[inline(always)]
    fn visit(&mut self, value: &T) -> Self::Output {
        (**self).visit(value)
    }
}

impl<T: ?Sized, V: VisitorMut<T> + ?Sized> VisitorMut<T> for &mut V {
    type Output = V::Output;

    #[inline(always)]
    fn visit_mut(&mut self, value: &mut T) -> Self::Output {
        (**self).visit_mut(value)
    }
}
